pub mod a001_cost_center;
pub mod a002_warehouse;
pub mod a003_employee;
pub mod logs;
