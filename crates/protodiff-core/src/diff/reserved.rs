//! Reservation checks shared by the message differ.

use crate::model::{FieldDecl, MessageDecl, ReservedRange};

/// True when `name` is reserved on `message` (exact string match).
pub fn is_name_reserved(message: &MessageDecl, name: &str) -> bool {
    message.reserved_names.iter().any(|n| n == name)
}

/// True when `number` falls inside one of `message`'s reserved ranges.
pub fn is_number_reserved(message: &MessageDecl, number: i32) -> bool {
    message.reserved_ranges.iter().any(|r| r.contains(number))
}

/// A removed field is exempt only when both its name and its number are now
/// reserved on `message`.
pub fn is_field_reserved(message: &MessageDecl, field: &FieldDecl) -> bool {
    is_name_reserved(message, &field.name) && is_number_reserved(message, field.number)
}

/// The first range of `message` that wholly contains `range`, if any.
///
/// Coverage assembled from several adjacent ranges does not count.
pub fn covering_range<'a>(
    message: &'a MessageDecl,
    range: &ReservedRange,
) -> Option<&'a ReservedRange> {
    message.reserved_ranges.iter().find(|r| r.covers(range))
}
