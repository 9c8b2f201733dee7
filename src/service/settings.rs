use chrono::Utc;
use tracing::{debug, info};

use crate::db::models::{Setting, UpsertOutcome};
use crate::db::patch::SettingWrite;
use crate::db::sqlite::AdvisingStorage;
use crate::error::AdminError;
use crate::types::required;
use crate::types::setting::SettingInput;

pub async fn upsert_setting(
    storage: &AdvisingStorage,
    input: SettingInput,
) -> Result<(Setting, UpsertOutcome), AdminError> {
    let key = required(input.key, "key")?;
    let (setting, outcome) = storage
        .upsert_setting(
            SettingWrite {
                key,
                value: input.value,
                category: input.category,
            },
            Utc::now(),
        )
        .await?;
    info!(key = %setting.key, ?outcome, "setting saved");
    Ok((setting, outcome))
}

/// Applies every keyed entry in order and returns the stored rows in the same order.
/// Entries without a key are skipped.
pub async fn upsert_settings(
    storage: &AdvisingStorage,
    inputs: Vec<SettingInput>,
) -> Result<Vec<Setting>, AdminError> {
    let submitted = inputs.len();
    let writes = keyed_writes(inputs);
    if writes.len() < submitted {
        debug!(skipped = submitted - writes.len(), "skipping settings without a key");
    }
    let stored = storage.upsert_settings(writes, Utc::now()).await?;
    info!(count = stored.len(), "settings batch saved");
    Ok(stored)
}

fn keyed_writes(inputs: Vec<SettingInput>) -> Vec<SettingWrite> {
    inputs
        .into_iter()
        .filter_map(|input| match input.key {
            Some(key) if !key.is_empty() => Some(SettingWrite {
                key,
                value: input.value,
                category: input.category,
            }),
            _ => None,
        })
        .collect()
}
