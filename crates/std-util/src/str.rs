//! Case conversions used when deriving storage names from type and field
//! names.

use heck::ToSnakeCase;

pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_type_names() {
        assert_eq!(snake_case("Position"), "position");
        assert_eq!(snake_case("PhysicalObject"), "physical_object");
        assert_eq!(snake_case("already_snake"), "already_snake");
    }
}
