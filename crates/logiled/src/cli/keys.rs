//! `keys` subcommand — list key names accepted by `--key`.

use super::{KeyJson, KeysOutput, LogiLedKey, Result, kv, kv_width, print_json};

pub(super) fn cmd_keys(json: bool) -> Result<()> {
    if json {
        let keys: Vec<KeyJson> = LogiLedKey::ALL
            .iter()
            .map(|k| KeyJson {
                name: k.name(),
                code: k.key_name(),
            })
            .collect();
        return print_json(&KeysOutput {
            count: keys.len(),
            keys,
        });
    }

    let names: Vec<&str> = LogiLedKey::ALL.iter().map(|k| k.name()).collect();
    let w = kv_width(&names, &[]);
    for key in LogiLedKey::ALL {
        kv(key.name(), key.key_name(), w);
    }
    Ok(())
}
