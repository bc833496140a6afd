use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour padding:zero]:[minute padding:zero]");

/// `HH:MM` in the local offset, falling back to UTC when the offset is unknown.
pub fn format_message_time(timestamp: OffsetDateTime) -> Option<String> {
    let local = match UtcOffset::current_local_offset() {
        Ok(offset) => timestamp.to_offset(offset),
        Err(_) => timestamp,
    };
    format_in_offset(local)
}

fn format_in_offset(datetime: OffsetDateTime) -> Option<String> {
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}
