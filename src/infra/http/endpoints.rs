use crate::infra::wire::{ALL_PATH, CREATE_PATH, DELETE_PATH, SINGLE_PATH, UPDATE_PATH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitEndpoints {
    pub get_all: String,
    pub get_single: String,
    pub create: String,
    pub update: String,
    pub delete: String,
}

impl UnitEndpoints {
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            get_all: format!("{base}{ALL_PATH}"),
            get_single: format!("{base}{SINGLE_PATH}"),
            create: format!("{base}{CREATE_PATH}"),
            update: format!("{base}{UPDATE_PATH}"),
            delete: format!("{base}{DELETE_PATH}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_not_doubled() {
        let endpoints = UnitEndpoints::new("http://localhost:3005/");
        assert_eq!(endpoints.get_all, "http://localhost:3005/units/all");
        assert_eq!(endpoints.delete, "http://localhost:3005/units/delete");
    }
}
