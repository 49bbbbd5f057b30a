use super::repository;
use crate::domain::a003_employee;
use crate::shared::error::ServiceError;
use crate::shared::logger;
use contracts::domain::a001_cost_center::aggregate::{CostCenter, CostCenterDto};
use contracts::domain::a001_cost_center::analysis::{analyze, CostCenterAnalysis};
use contracts::domain::a001_cost_center::references::{check_deletable, check_parent};
use contracts::domain::a001_cost_center::tree::{CostCenterTree, CostCenterTreeQuery};
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

pub async fn create(dto: CostCenterDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("CC-{}", &Uuid::new_v4().simple().to_string()[..8]));
    let mut aggregate = CostCenter::new_for_insert(
        code,
        dto.description.clone(),
        None,
        None,
        0,
        0.0,
        None,
    );
    aggregate.update(&CostCenterDto {
        code: None,
        ..dto
    });

    aggregate.validate().map_err(ServiceError::Validation)?;
    check_references(&aggregate).await?;
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    logger::log(
        &CostCenter::full_name(),
        &format!("Создан центр затрат {}", aggregate.base.code),
    );
    Ok(id)
}

pub async fn update(dto: CostCenterDto) -> anyhow::Result<()> {
    let raw_id = dto.id.clone().unwrap_or_default();
    let id = Uuid::parse_str(raw_id.trim()).map_err(|_| ServiceError::InvalidId(raw_id))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .filter(|c| !c.base.metadata.is_deleted)
        .ok_or_else(|| ServiceError::NotFound(format!("{} {}", CostCenter::element_name(), id)))?;

    aggregate.update(&dto);

    aggregate.validate().map_err(ServiceError::Validation)?;
    check_references(&aggregate).await?;
    aggregate.before_write();

    repository::update(&aggregate).await?;
    logger::log(
        &CostCenter::full_name(),
        &format!("Изменён центр затрат {}", aggregate.base.code),
    );
    Ok(())
}

/// Уникальность кода и корректность родителя среди неудалённых записей
async fn check_references(aggregate: &CostCenter) -> anyhow::Result<()> {
    let holder = repository::get_by_code(&aggregate.base.code).await?;
    aggregate
        .base
        .ensure_code_free(holder.as_ref().map(|h| &h.base))
        .map_err(ServiceError::Validation)?;

    let live = repository::list_all().await?;
    check_parent(aggregate, &live).map_err(ServiceError::Validation)?;
    Ok(())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let live = repository::list_all().await?;
    check_deletable(&id.to_string(), &live).map_err(ServiceError::Validation)?;

    let deleted = repository::soft_delete(id).await?;
    if deleted {
        logger::log(&CostCenter::full_name(), &format!("Удалён центр затрат {}", id));
    }
    Ok(deleted)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<CostCenter>> {
    Ok(repository::get_by_id(id)
        .await?
        .filter(|c| !c.base.metadata.is_deleted))
}

pub async fn list_all() -> anyhow::Result<Vec<CostCenter>> {
    repository::list_all().await
}

pub async fn analysis() -> anyhow::Result<CostCenterAnalysis> {
    let items = repository::list_all().await?;
    Ok(analyze(&items))
}

pub async fn tree(query: &CostCenterTreeQuery) -> anyhow::Result<CostCenterTree> {
    let items = repository::list_all().await?;
    let tree = CostCenterTree::build(&items, query);
    if !tree.report.is_clean() {
        tracing::warn!(
            "Cost center tree: {} dangling, {} duplicate, {} unreachable",
            tree.report.dangling_count(),
            tree.report.duplicate_count(),
            tree.report.unreachable_count()
        );
    }
    Ok(tree)
}

struct Seed {
    code: &'static str,
    description: &'static str,
    parent: Option<&'static str>,
    employee_count: u32,
    budget: f64,
}

const SEED: &[Seed] = &[
    Seed { code: "CC-100", description: "Производство", parent: None, employee_count: 12, budget: 4_500_000.0 },
    Seed { code: "CC-110", description: "Цех сборки", parent: Some("CC-100"), employee_count: 48, budget: 2_100_000.0 },
    Seed { code: "CC-111", description: "Участок упаковки", parent: Some("CC-110"), employee_count: 9, budget: 350_000.0 },
    Seed { code: "CC-120", description: "Цех окраски", parent: Some("CC-100"), employee_count: 21, budget: 900_000.0 },
    Seed { code: "CC-200", description: "Администрация", parent: None, employee_count: 7, budget: 1_200_000.0 },
    Seed { code: "CC-210", description: "Бухгалтерия", parent: Some("CC-200"), employee_count: 5, budget: 600_000.0 },
    Seed { code: "CC-220", description: "Информационные технологии", parent: Some("CC-200"), employee_count: 6, budget: 1_500_000.0 },
    Seed { code: "CC-300", description: "Логистика", parent: None, employee_count: 15, budget: 800_000.0 },
];

/// Демонстрационная иерархия; уже существующие коды пропускаются
pub async fn insert_test_data() -> anyhow::Result<usize> {
    a003_employee::service::insert_test_data().await?;
    let employees = a003_employee::service::list_all().await?;

    let mut inserted = 0;
    // Родители в SEED всегда идут раньше детей
    for seed in SEED {
        if repository::get_by_code(seed.code).await?.is_some() {
            continue;
        }
        let parent_id = match seed.parent {
            Some(code) => repository::get_by_code(code)
                .await?
                .map(|p| p.to_string_id()),
            None => None,
        };
        create(CostCenterDto {
            id: None,
            code: Some(seed.code.into()),
            description: seed.description.into(),
            parent_id,
            // Ответственные назначаются только верхнему уровню
            manager_id: match seed.parent {
                None if !employees.is_empty() => {
                    Some(employees[inserted % employees.len()].to_string_id())
                }
                _ => None,
            },
            employee_count: seed.employee_count,
            budget: seed.budget,
            comment: None,
        })
        .await?;
        inserted += 1;
    }
    tracing::info!("Cost center test data: {} records inserted", inserted);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_parents_come_first() {
        for (idx, seed) in SEED.iter().enumerate() {
            if let Some(parent) = seed.parent {
                let parent_idx = SEED.iter().position(|s| s.code == parent);
                assert!(matches!(parent_idx, Some(p) if p < idx), "{}", seed.code);
            }
        }
    }
}
