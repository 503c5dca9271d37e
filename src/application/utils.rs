/// Maximum length of a single outbound chat message, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Packs `items` into as few messages as possible, in order, without splitting an item.
/// Every chunk stays within `max` characters unless a single item is longer on its own,
/// in which case that item is sent by itself.
pub fn chunk_items<S: AsRef<str>>(items: &[S], max: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for item in items {
        let item = item.as_ref();
        let item_len = item.chars().count();
        if current_len > 0 && current_len + item_len > max {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push_str(item);
        current_len += item_len;
    }

    if current_len > 0 {
        chunks.push(current);
    }
    chunks
}
