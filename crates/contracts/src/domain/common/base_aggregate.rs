use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Базовый агрегат с обязательными полями для всех справочников
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Уникальный идентификатор записи
    pub id: Id,
    /// Бизнес-код записи (например, "CC-010", "WH-MAIN")
    pub code: String,
    /// Наименование
    pub description: String,
    pub comment: Option<String>,
    /// Метаданные жизненного цикла
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    pub fn new(id: Id, code: String, description: String) -> Self {
        Self {
            id,
            code,
            description,
            comment: None,
            metadata: EntityMetadata::new(),
        }
    }

    /// Создать агрегат с существующими метаданными (для загрузки из БД)
    pub fn with_metadata(
        id: Id,
        code: String,
        description: String,
        comment: Option<String>,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            code,
            description,
            comment,
            metadata,
        }
    }

    pub fn touch(&mut self) {
        self.metadata.touch();
    }

    /// `holder` is the live record that currently owns the same code, if any.
    pub fn ensure_code_free(&self, holder: Option<&BaseAggregate<Id>>) -> Result<(), String>
    where
        Id: PartialEq,
    {
        match holder {
            Some(other) if other.id != self.id => {
                Err(format!("Код {} уже используется", self.code.trim()))
            }
            _ => Ok(()),
        }
    }

    /// Общая проверка кода и наименования
    pub fn validate_identity(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.description.trim().is_empty() {
            return Err("Наименование не может быть пустым".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_free_unless_held_by_another_record() {
        let mine = BaseAggregate::new(1u32, "CC-1".to_string(), "Офис".to_string());
        let same_record = BaseAggregate::new(1u32, "CC-1".to_string(), "Офис".to_string());
        let other = BaseAggregate::new(2u32, "CC-1".to_string(), "Склад".to_string());

        assert!(mine.ensure_code_free(None).is_ok());
        assert!(mine.ensure_code_free(Some(&same_record)).is_ok());
        assert!(mine.ensure_code_free(Some(&other)).is_err());
    }
}
