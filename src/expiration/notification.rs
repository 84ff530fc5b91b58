use super::{KeyInfo, KeyStatus};
use crate::timestamp::format_date;

/// Whether any key is expired or about to expire
pub fn needs_rotation(key_infos: &[KeyInfo]) -> bool {
    key_infos
        .iter()
        .any(|info| matches!(info.status, KeyStatus::Warning | KeyStatus::Expired))
}

/// Render the result of a check as text for a terminal
pub fn format_notification(key_infos: &[KeyInfo]) -> String {
    if key_infos.is_empty() {
        return "No keys found".into();
    }

    let mut result = String::new();
    for info in key_infos {
        let date = format_date(info.expire_time);
        let line = match info.status {
            KeyStatus::Expired => {
                format!("⚠️ KEY EXPIRED: Key ID {} expired on {date}\n", info.key_id)
            }
            KeyStatus::Warning => format!(
                "⚠️ WARNING: Key ID {} will expire in {} days (on {date})\n",
                info.key_id, info.days_left
            ),
            KeyStatus::Valid => format!(
                "✅ Key ID {} is valid (expires in {} days on {date})\n",
                info.key_id, info.days_left
            ),
        };
        result.push_str(&line);
    }

    if needs_rotation(key_infos) {
        result.push_str("\nPlease rotate any keys that are expired or will expire soon.\n");
        result.push_str("Use 'keyexpiry authorized-keys create-keyset' to create new keys.\n");
    }

    result
}
