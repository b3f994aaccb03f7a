//! Decode rules for SCORE call results.
//!
//! SCORE methods answer with JSON objects whose values are strings: hex
//! integers, addresses, plain text. A [`Schema`] names the fields a result
//! carries and how each one decodes; fields it does not name are passed
//! through untouched.

/// How a single field decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Hex integer.
    Int,
    /// Hex integer denominated in loop, displayed as ICX.
    Icx,
    /// `0x0` / `0x1`.
    Bool,
    /// `hx..` / `cx..` address.
    Address,
    /// Plain string.
    Str,
    /// `0x`-prefixed byte string.
    Bytes,
    /// JSON array of the inner type.
    List(&'static FieldType),
    /// Nested JSON object.
    Record(&'static Schema),
}

/// Named set of field decode rules.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [(&'static str, FieldType)],
}

impl Schema {
    /// Looks up the decode rule of a field.
    pub fn field(&self, name: &str) -> Option<FieldType> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, ty)| *ty)
    }
}

pub static UNSTAKE: Schema = Schema {
    name: "unstake",
    fields: &[
        ("unstake", FieldType::Icx),
        ("unstakeBlockHeight", FieldType::Int),
        ("remainingBlocks", FieldType::Int),
    ],
};

static UNSTAKE_ENTRY: FieldType = FieldType::Record(&UNSTAKE);

/// `getStake`
pub static GET_STAKE: Schema = Schema {
    name: "getStake",
    fields: &[
        ("stake", FieldType::Icx),
        ("unstakes", FieldType::List(&UNSTAKE_ENTRY)),
    ],
};

/// `getPRep`
pub static GET_PREP: Schema = Schema {
    name: "getPRep",
    fields: &[
        ("address", FieldType::Address),
        ("nodeAddress", FieldType::Address),
        ("name", FieldType::Str),
        ("country", FieldType::Str),
        ("city", FieldType::Str),
        ("email", FieldType::Str),
        ("website", FieldType::Str),
        ("details", FieldType::Str),
        ("p2pEndpoint", FieldType::Str),
        ("status", FieldType::Int),
        ("grade", FieldType::Int),
        ("penalty", FieldType::Int),
        ("stake", FieldType::Icx),
        ("delegated", FieldType::Icx),
        ("bonded", FieldType::Icx),
        ("power", FieldType::Icx),
        ("irep", FieldType::Icx),
        ("irepUpdateBlockHeight", FieldType::Int),
        ("lastHeight", FieldType::Int),
        ("totalBlocks", FieldType::Int),
        ("validatedBlocks", FieldType::Int),
        ("unvalidatedSequenceBlocks", FieldType::Int),
        ("blockHeight", FieldType::Int),
        ("txIndex", FieldType::Int),
    ],
};

static PREP_ENTRY: FieldType = FieldType::Record(&GET_PREP);

/// `getPReps`, also used for `getPRepStats`
pub static GET_PREPS: Schema = Schema {
    name: "getPReps",
    fields: &[
        ("blockHeight", FieldType::Int),
        ("startRanking", FieldType::Int),
        ("totalDelegated", FieldType::Icx),
        ("totalStake", FieldType::Icx),
        ("totalBonded", FieldType::Icx),
        ("totalPower", FieldType::Icx),
        ("preps", FieldType::List(&PREP_ENTRY)),
    ],
};

pub static DELEGATION: Schema = Schema {
    name: "delegation",
    fields: &[("address", FieldType::Address), ("value", FieldType::Icx)],
};

static DELEGATION_ENTRY: FieldType = FieldType::Record(&DELEGATION);

/// `getDelegation`
pub static GET_DELEGATION: Schema = Schema {
    name: "getDelegation",
    fields: &[
        ("delegations", FieldType::List(&DELEGATION_ENTRY)),
        ("totalDelegated", FieldType::Icx),
        ("votingPower", FieldType::Icx),
    ],
};

/// `queryIScore`
pub static QUERY_ISCORE: Schema = Schema {
    name: "queryIScore",
    fields: &[
        ("blockHeight", FieldType::Int),
        ("iscore", FieldType::Int),
        ("estimatedICX", FieldType::Icx),
    ],
};

/// `getRevision`
pub static GET_REVISION: Schema = Schema {
    name: "getRevision",
    fields: &[("code", FieldType::Int), ("name", FieldType::Str)],
};

pub static DEPLOY_INFO: Schema = Schema {
    name: "deployInfo",
    fields: &[
        ("status", FieldType::Str),
        ("deployTxHash", FieldType::Bytes),
        ("auditTxHash", FieldType::Bytes),
    ],
};

/// `getScoreStatus`
pub static GET_SCORE_STATUS: Schema = Schema {
    name: "getScoreStatus",
    fields: &[
        ("current", FieldType::Record(&DEPLOY_INFO)),
        ("next", FieldType::Record(&DEPLOY_INFO)),
        ("owner", FieldType::Address),
        ("blocked", FieldType::Bool),
        ("disabled", FieldType::Bool),
    ],
};

/// `icx_getTransactionResult`
pub static TX_RESULT: Schema = Schema {
    name: "txResult",
    fields: &[
        ("status", FieldType::Int),
        ("to", FieldType::Address),
        ("txHash", FieldType::Bytes),
        ("txIndex", FieldType::Int),
        ("blockHeight", FieldType::Int),
        ("blockHash", FieldType::Bytes),
        ("cumulativeStepUsed", FieldType::Int),
        ("stepUsed", FieldType::Int),
        ("stepPrice", FieldType::Icx),
        ("scoreAddress", FieldType::Address),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_lookup() {
        assert_eq!(GET_STAKE.field("stake"), Some(FieldType::Icx));
        assert_eq!(
            GET_STAKE.field("unstakes"),
            Some(FieldType::List(&UNSTAKE_ENTRY))
        );
        assert_eq!(GET_STAKE.field("unknown"), None);
    }
}
