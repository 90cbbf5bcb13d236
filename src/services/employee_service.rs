use uuid::Uuid;

use crate::{
    db::dao::{EmployeeDao, PaginatedResponse, UserDao},
    db::entities::employee,
    error::AppError,
    validation::{Cpf, Phone},
};

pub struct NewEmployee {
    pub user_id: Uuid,
    pub cpf: Cpf,
    pub phone: Phone,
}

/// Callers must have checked the admin role before reaching this service.
#[derive(Clone)]
pub struct EmployeeService {
    employees: EmployeeDao,
    users: UserDao,
}

impl EmployeeService {
    pub fn new(employees: EmployeeDao, users: UserDao) -> Self {
        Self { employees, users }
    }

    pub async fn create(&self, input: NewEmployee) -> Result<employee::Model, AppError> {
        if self.users.find_optional(input.user_id).await?.is_none() {
            return Err(AppError::not_found("User not found"));
        }
        if self.employees.find_by_user(input.user_id).await?.is_some() {
            return Err(AppError::conflict("Employee profile already exists"));
        }
        if self.employees.find_by_cpf(input.cpf.as_str()).await?.is_some() {
            return Err(AppError::conflict("CPF already registered"));
        }

        let employee = self
            .employees
            .create_employee(input.user_id, input.cpf.as_str(), input.phone.as_str())
            .await?;
        tracing::info!(user_id = %input.user_id, employee_id = %employee.id, "created employee");
        Ok(employee)
    }

    pub async fn list(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<PaginatedResponse<employee::Model>, AppError> {
        Ok(self.employees.list(page, page_size).await?)
    }

    pub async fn me(&self, user_id: Uuid) -> Result<employee::Model, AppError> {
        self.employees
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee profile not found"))
    }
}
