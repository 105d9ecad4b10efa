extern crate std;

use std::string::ToString;

use crate::linked_list::intrusive::error::{ListError, Method, describe};

#[test]
fn test_describe_maps_ok_to_success() {
    assert_eq!(describe(&Ok::<_, ListError>(())), "success");
    assert_eq!(describe::<()>(&Err(ListError::NullValue)), ListError::NullValue.message());
}

#[test]
fn test_every_error_has_a_distinct_message() {
    let errors = [
        ListError::NullValue,
        ListError::OutOfMemory,
        ListError::MissingMethod(Method::Print),
        ListError::MissingMethod(Method::Match),
        ListError::ForeignNode,
        ListError::StaleNode,
        ListError::Format(core::fmt::Error),
    ];
    for (i, a) in errors.iter().enumerate() {
        for b in &errors[i + 1..] {
            assert_ne!(a.message(), b.message());
        }
    }
}

#[test]
fn test_display_names_the_missing_method() {
    let error = ListError::MissingMethod(Method::Match);
    assert_eq!(error.to_string(), "the `match` method was not configured for this list");
    assert_eq!(ListError::ForeignNode.to_string(), "the node belongs to a different list");
}

#[test]
fn test_missing_method_messages_name_the_callback() {
    assert_eq!(Method::Print.to_string(), "print");
    assert_eq!(Method::Match.to_string(), "match");
    assert_eq!(ListError::MissingMethod(Method::Print).message(), "missing method: print");
    assert_eq!(ListError::MissingMethod(Method::Match).message(), "missing method: match");
}
