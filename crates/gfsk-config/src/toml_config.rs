use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use toml::Value;

use gfsk_core::freqs::ChannelPlan;

use super::chain_config::{ChainConfig, ModemConfig, ReceiverConfig};

/// Build a validated `ChainConfig` from a TOML string.
pub fn from_toml_str(toml_str: &str) -> Result<ChainConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if let Some(ref m) = root.modem {
        if !m.extra.is_empty() {
            return Err(format!("Unrecognized fields in modem: {:?}", sorted_keys(&m.extra)).into());
        }
    }
    if let Some(ref r) = root.receiver {
        if !r.extra.is_empty() {
            return Err(format!("Unrecognized fields in receiver: {:?}", sorted_keys(&r.extra)).into());
        }
    }

    let mut cfg = ChainConfig::default();
    if let Some(m) = root.modem {
        apply_modem_patch(&mut cfg.modem, m);
    }
    if let Some(r) = root.receiver {
        apply_receiver_patch(&mut cfg.receiver, r);
    }

    cfg.validate()?;
    Ok(cfg)
}

/// Build a `ChainConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<ChainConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build a `ChainConfig` from a file path.
pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<ChainConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    let r = BufReader::new(f);
    let cfg = from_reader(r)?;
    Ok(cfg)
}

fn apply_modem_patch(dst: &mut ModemConfig, src: ModemDto) {
    if let Some(v) = src.carrier_hz {
        dst.carrier_hz = v;
    }
    if let Some(v) = src.symbol_rate_hz {
        dst.symbol_rate_hz = v;
    }
    if let Some(v) = src.sample_rate_hz {
        dst.sample_rate_hz = v;
    }
    if let Some(v) = src.modulation_index {
        dst.modulation_index = v;
    }
    if let Some(v) = src.amplitude {
        dst.amplitude = v;
    }
    if let Some(v) = src.pulse_oversampling {
        dst.pulse_oversampling = v;
    }
}

fn apply_receiver_patch(dst: &mut ReceiverConfig, src: ReceiverDto) {
    if let Some(v) = src.channel_index {
        dst.channel = ChannelPlan::new(v);
    }
    if let Some(v) = src.if_hz {
        dst.channel.if_hz = v;
    }
    if let Some(v) = src.analog_rate_hz {
        dst.analog_rate_hz = v;
    }
    if let Some(v) = src.adc_rate_hz {
        dst.adc_rate_hz = v;
    }
    if let Some(v) = src.code_bits {
        dst.code_bits = v;
    }
    if let Some(v) = src.capture_window_s {
        dst.capture_window_s = v;
    }
    if let Some(v) = src.antialias_order {
        dst.antialias_order = v;
    }
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    #[serde(default)]
    modem: Option<ModemDto>,

    #[serde(default)]
    receiver: Option<ReceiverDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct ModemDto {
    carrier_hz: Option<f64>,
    symbol_rate_hz: Option<f64>,
    sample_rate_hz: Option<f64>,
    modulation_index: Option<f64>,
    amplitude: Option<f64>,
    pulse_oversampling: Option<usize>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct ReceiverDto {
    channel_index: Option<u8>,
    if_hz: Option<f64>,
    analog_rate_hz: Option<f64>,
    adc_rate_hz: Option<f64>,
    code_bits: Option<u32>,
    capture_window_s: Option<f64>,
    antialias_order: Option<usize>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let cfg = from_toml_str("").unwrap();
        assert_eq!(cfg, ChainConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg = from_toml_str(
            r#"
            [modem]
            symbol_rate_hz = 2e6
            sample_rate_hz = 40e6

            [receiver]
            channel_index = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.modem.symbol_rate_hz, 2_000_000.0);
        assert_eq!(cfg.modem.oversampling().unwrap(), 20);
        assert_eq!(cfg.receiver.channel.channel_index, 3);
        // untouched fields keep their defaults
        assert_eq!(cfg.modem.modulation_index, 0.5);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = from_toml_str(
            r#"
            [modem]
            carrier_mhz = 2.0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("carrier_mhz"));
    }

    #[test]
    fn test_unknown_table_rejected() {
        let err = from_toml_str("[transmitter]\npower = 1.0\n").unwrap_err();
        assert!(err.to_string().contains("transmitter"));
    }

    #[test]
    fn test_invalid_values_rejected_on_load() {
        let err = from_toml_str(
            r#"
            [modem]
            sample_rate_hz = 20.5e6
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not an integer"));
    }
}
