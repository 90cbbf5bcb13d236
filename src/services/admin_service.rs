use crate::{
    auth::{Claims, Principal, Role},
    db::dao::{AdminDao, DaoBase, DaoLayerError, UserDao},
    db::entities::{admin, user},
    error::AppError,
};

/// The freshly re-loaded record behind an admin token.
#[derive(Debug, Clone)]
pub enum AdminActor {
    Admin(admin::Model),
    User(user::Model),
}

impl AdminActor {
    pub fn name(&self) -> &str {
        match self {
            AdminActor::Admin(admin) => &admin.name,
            AdminActor::User(user) => &user.name,
        }
    }
}

#[derive(Clone)]
pub struct AdminService {
    admins: AdminDao,
    users: UserDao,
}

impl AdminService {
    pub fn new(admins: AdminDao, users: UserDao) -> Self {
        Self { admins, users }
    }

    /// Confirms against the database that the token subject may still act as admin.
    pub async fn authorize(&self, claims: &Claims) -> Result<AdminActor, AppError> {
        if !claims.has_role(Role::Admin) {
            return Err(AppError::forbidden("Access denied"));
        }
        let id = claims.subject_id()?;

        match claims.principal {
            Principal::Admin => match self.admins.find_by_id(id).await {
                Ok(admin) if admin.active => Ok(AdminActor::Admin(admin)),
                Ok(_) | Err(DaoLayerError::NotFound { .. }) => {
                    Err(AppError::forbidden("Access denied"))
                }
                Err(err) => Err(err.into()),
            },
            Principal::User => match self.users.find_optional(id).await? {
                Some(user) if user.role == Role::Admin.as_str() => Ok(AdminActor::User(user)),
                _ => Err(AppError::forbidden("Access denied")),
            },
        }
    }
}
