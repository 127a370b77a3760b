//! Step sequencer: a cursor over the research-type dependent sequence.

use thiserror::Error;
use tracing::debug;

use crate::field::{FieldDescriptor, FieldKey, FieldValue};
use crate::messages;
use crate::schema::applicable_fields;
use crate::store::MatrixData;
use crate::validation::Violation;

/// Where the cursor stands in the current sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Active {
        index: usize,
        total: usize,
        field: &'static FieldDescriptor,
    },
    /// Past the last step: the summary
    Terminal { total: usize },
}

impl Position {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Position::Terminal { .. })
    }

    pub fn total(&self) -> usize {
        match self {
            Position::Active { total, .. } | Position::Terminal { total } => *total,
        }
    }

    pub fn field(&self) -> Option<&'static FieldDescriptor> {
        match self {
            Position::Active { field, .. } => Some(field),
            Position::Terminal { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("{message}")]
    Rejected {
        field: FieldKey,
        violation: Violation,
        message: String,
    },

    #[error("Ya estás en el primer paso")]
    AtStart,

    #[error("La matriz ya está completa")]
    AtTerminal,
}

/// Cursor over `applicable_fields(research_type)`. The sequence is never
/// stored; it is recomputed from the store on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw index, clamped to the current sequence length
    pub fn index(&self, data: &MatrixData) -> usize {
        self.index.min(applicable_fields(data.research_type()).len())
    }

    pub fn position(&self, data: &MatrixData) -> Position {
        let sequence = applicable_fields(data.research_type());
        let total = sequence.len();
        let index = self.index.min(total);
        match sequence.get(index) {
            Some(field) => Position::Active {
                index,
                total,
                field,
            },
            None => Position::Terminal { total },
        }
    }

    /// Move forward when the active field accepts the staged value
    pub fn advance(
        &mut self,
        data: &MatrixData,
        staged: &FieldValue,
    ) -> Result<Position, NavigationError> {
        let (index, field) = match self.position(data) {
            Position::Active { index, field, .. } => (index, field),
            Position::Terminal { .. } => return Err(NavigationError::AtTerminal),
        };

        if let Err(violation) = field.validate(staged, data.research_type()) {
            debug!(field = %field.key, ?violation, "advance rejected");
            return Err(NavigationError::Rejected {
                field: field.key,
                message: messages::warning(field.key, &violation),
                violation,
            });
        }

        self.index = index + 1;
        Ok(self.position(data))
    }

    pub fn retreat(&mut self, data: &MatrixData) -> Result<Position, NavigationError> {
        match self.position(data) {
            Position::Terminal { .. } => Err(NavigationError::AtTerminal),
            Position::Active { index: 0, .. } => Err(NavigationError::AtStart),
            Position::Active { index, .. } => {
                self.index = index - 1;
                Ok(self.position(data))
            }
        }
    }

    /// Back to the first step together with a store reset
    pub fn reset(&mut self, data: &mut MatrixData) {
        data.reset();
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResearchType;

    fn qualitative() -> MatrixData {
        let mut data = MatrixData::new();
        data.set(FieldKey::ResearchType, FieldValue::text("Cualitativa"));
        data
    }

    #[test]
    fn test_advance_rejected_on_invalid_value() {
        let data = qualitative();
        let mut cursor = Cursor::new();
        cursor
            .advance(&data, &FieldValue::text("Cualitativa"))
            .unwrap();

        let err = cursor
            .advance(&data, &FieldValue::text("Corto"))
            .unwrap_err();
        assert!(matches!(
            err,
            NavigationError::Rejected {
                field: FieldKey::Topic,
                violation: Violation::TooShort { min: 20 },
                ..
            }
        ));
        assert_eq!(cursor.index(&data), 1);
    }

    #[test]
    fn test_retreat_rejected_at_start() {
        let data = MatrixData::new();
        let mut cursor = Cursor::new();
        assert_eq!(cursor.retreat(&data), Err(NavigationError::AtStart));
        assert_eq!(cursor.index(&data), 0);
    }

    #[test]
    fn test_retreat_decrements_by_one() {
        let data = qualitative();
        let mut cursor = Cursor { index: 4 };
        let pos = cursor.retreat(&data).unwrap();
        assert!(matches!(pos, Position::Active { index: 3, .. }));
    }

    #[test]
    fn test_terminal_rejects_navigation() {
        let data = qualitative();
        let mut cursor = Cursor { index: 11 };
        assert!(cursor.position(&data).is_terminal());
        assert_eq!(
            cursor.advance(&data, &FieldValue::text("x")),
            Err(NavigationError::AtTerminal)
        );
        assert_eq!(cursor.retreat(&data), Err(NavigationError::AtTerminal));
    }

    #[test]
    fn test_index_is_clamped_when_sequence_shrinks() {
        let mut data = MatrixData::new();
        data.set(FieldKey::ResearchType, FieldValue::text("Mixta"));
        let cursor = Cursor { index: 15 };
        assert_eq!(cursor.position(&data), Position::Terminal { total: 15 });

        data.set(FieldKey::ResearchType, FieldValue::text("Cualitativa"));
        assert_eq!(cursor.index(&data), 11);
        assert!(cursor.position(&data).is_terminal());
    }

    #[test]
    fn test_reset_from_terminal() {
        let mut data = qualitative();
        data.set(FieldKey::Topic, FieldValue::text("Un tema cualquiera de prueba"));
        let mut cursor = Cursor { index: 11 };
        cursor.reset(&mut data);
        assert_eq!(cursor.index(&data), 0);
        assert_eq!(data, MatrixData::default());
        assert_eq!(data.research_type(), None::<ResearchType>);
    }
}
