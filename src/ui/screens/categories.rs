use crate::models::{category, TransactionType};
use crate::ui::util::capitalize;

/// The catalog for one type, or both when `kind` is `None`.
pub(crate) fn render(kind: Option<TransactionType>) -> String {
    let kinds: Vec<TransactionType> = match kind {
        Some(k) => vec![k],
        None => TransactionType::all().to_vec(),
    };
    let mut lines = Vec::new();
    for (i, k) in kinds.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(capitalize(k.as_str()));
        lines.extend(category::for_type(k).iter().map(|name| format!("  {name}")));
    }
    lines.join("\n")
}
