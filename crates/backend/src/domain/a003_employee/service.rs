use super::repository;
use crate::shared::error::ServiceError;
use contracts::domain::a003_employee::aggregate::{Employee, EmployeeDto};
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

pub async fn create(dto: EmployeeDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| format!("EMP-{}", &Uuid::new_v4().simple().to_string()[..8]));
    let mut aggregate = Employee::new_for_insert(code, dto.description.clone(), String::new());
    aggregate.update(&EmployeeDto { code: None, ..dto });

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: EmployeeDto) -> anyhow::Result<()> {
    let raw_id = dto.id.clone().unwrap_or_default();
    let id = Uuid::parse_str(raw_id.trim()).map_err(|_| ServiceError::InvalidId(raw_id))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("{} {}", Employee::element_name(), id)))?;

    aggregate.update(&dto);

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn list_all() -> anyhow::Result<Vec<Employee>> {
    repository::list_all().await
}

/// Ответственные для демонстрационных данных
pub async fn insert_test_data() -> anyhow::Result<usize> {
    if !repository::list_all().await?.is_empty() {
        return Ok(0);
    }
    let seed = [
        ("EMP-001", "Иванов Иван Иванович", "Начальник производства"),
        ("EMP-002", "Петрова Анна Сергеевна", "Главный бухгалтер"),
        ("EMP-003", "Сидоров Павел Олегович", "Заведующий складом"),
    ];
    for (code, name, position) in seed {
        create(EmployeeDto {
            id: None,
            code: Some(code.into()),
            description: name.into(),
            position: position.into(),
            is_active: true,
            comment: None,
        })
        .await?;
    }
    Ok(seed.len())
}
