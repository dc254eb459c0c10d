use crate::utils::short_type_name;

#[test]
fn bare_name_is_unchanged() {
    assert_eq!(short_type_name("BaselineModule"), "BaselineModule");
}

#[test]
fn module_path_is_trimmed() {
    assert_eq!(short_type_name("themes::MidnightTheme"), "MidnightTheme");
    assert_eq!(
        short_type_name("crate::host::module::BaselineModule"),
        "BaselineModule"
    );
}

#[test]
fn generic_arguments_are_preserved() {
    assert_eq!(
        short_type_name("registry::Entry<alloc::string::String>"),
        "Entry<alloc::string::String>"
    );
}

#[test]
fn empty_input_is_empty() {
    assert_eq!(short_type_name(""), "");
}
