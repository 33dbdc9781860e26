//! Merging of nested configuration maps

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Merge every entry of `target` into `d`, in place
///
/// Nested objects are merged recursively, creating the object in `d` first
/// when it is absent (a non-object value at that key is replaced). All other
/// values are replaced wholesale, arrays included.
///
/// With `allow_overwrite` unset, an existing non-object value is either left
/// alone or, when `overwrite_exception` is set, reported as a conflict.
/// Recursive calls always run with the default policy (overwrite allowed),
/// whatever the caller passed.
pub fn merge_dict_inplace(
    d: &mut Map<String, Value>,
    target: &Map<String, Value>,
    allow_overwrite: bool,
    overwrite_exception: bool,
) -> Result<()> {
    for (key, value) in target {
        if let Value::Object(nested) = value {
            let slot = d
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(existing) = slot {
                merge_dict_inplace(existing, nested, true, false)?;
            }
        } else {
            if !allow_overwrite {
                if let Some(existing) = d.get(key) {
                    if overwrite_exception {
                        return Err(Error::OverwriteConflict {
                            key: key.clone(),
                            existing: existing.clone(),
                            replacement: value.clone(),
                        });
                    }
                    continue;
                }
            }
            tracing::trace!("set {} = {}", key, value);
            d.insert(key.clone(), value.clone());
        }
    }
    Ok(())
}
