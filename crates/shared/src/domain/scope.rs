use crate::{domain::context::Role, utils::AppError};

/// Which cashiers' rows a read covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    User(i32),
}

impl Scope {
    /// A kasir always sees only their own rows, whatever they ask for. The
    /// owner sees everything unless a cashier id is requested; `"all"` and
    /// the empty string mean no filter.
    pub fn resolve(role: Role, user_id: i32, requested: Option<&str>) -> Result<Self, AppError> {
        if role == Role::Kasir {
            return Ok(Scope::User(user_id));
        }

        match requested.map(str::trim) {
            None | Some("") | Some("all") => Ok(Scope::All),
            Some(raw) => raw
                .parse::<i32>()
                .map(Scope::User)
                .map_err(|_| AppError::BadRequest(format!("Invalid cashier_id: {raw}"))),
        }
    }

    pub fn user_id(&self) -> Option<i32> {
        match self {
            Scope::All => None,
            Scope::User(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kasir_filter_is_ignored() {
        assert_eq!(
            Scope::resolve(Role::Kasir, 5, Some("9")).unwrap(),
            Scope::User(5)
        );
        assert_eq!(
            Scope::resolve(Role::Kasir, 5, Some("all")).unwrap(),
            Scope::User(5)
        );
    }

    #[test]
    fn owner_defaults_to_everyone() {
        assert_eq!(Scope::resolve(Role::Owner, 1, None).unwrap(), Scope::All);
        assert_eq!(Scope::resolve(Role::Owner, 1, Some("")).unwrap(), Scope::All);
        assert_eq!(
            Scope::resolve(Role::Owner, 1, Some("all")).unwrap(),
            Scope::All
        );
    }

    #[test]
    fn owner_can_narrow_to_one_cashier() {
        assert_eq!(
            Scope::resolve(Role::Owner, 1, Some("12")).unwrap(),
            Scope::User(12)
        );
        assert!(matches!(
            Scope::resolve(Role::Owner, 1, Some("abc")),
            Err(AppError::BadRequest(_))
        ));
    }
}
