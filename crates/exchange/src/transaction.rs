use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cambio_core::{Entity, TransactionId};

use crate::input::TransactionInput;

/// A posted transaction (immutable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: TransactionId,
    recorded_at: DateTime<Utc>,
    input: TransactionInput,
}

impl Transaction {
    pub(crate) fn record(input: TransactionInput, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: TransactionId::new(),
            recorded_at,
            input,
        }
    }

    pub fn id_typed(&self) -> TransactionId {
        self.id
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn input(&self) -> &TransactionInput {
        &self.input
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
