use log::{
    Record,
    kv::{Error, Key, Value, VisitSource},
};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::{Color, Encode, Style, Write};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct KvConsoleEncoderConfig {
    pub pattern: Option<String>,
}

/// Pattern encoder that appends the record's key/value pairs, highlighted,
/// after the message: `... RPC: Response received method=HEIGHT status=200`.
#[derive(Debug)]
pub struct KvConsoleEncoder {
    delegate: PatternEncoder,
}

impl KvConsoleEncoder {
    pub fn new(pattern: &str) -> Self {
        Self {
            delegate: PatternEncoder::new(pattern),
        }
    }
}

impl Encode for KvConsoleEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.delegate.encode(w, record)?;

        let mut pairs = PairCollector::default();
        if let Err(kv_err) = record.key_values().visit(&mut pairs) {
            write!(w, " [kv error: {}]", kv_err)?;
        }

        for (key, value) in &pairs.pairs {
            w.set_style(Style::new().text(Color::Cyan))?;
            write!(w, " {}=", key)?;
            w.set_style(&Style::default())?;
            write!(w, "{}", value)?;
        }

        w.write_all(b"\n")?;
        Ok(())
    }
}

/// Renders pairs up front so a failing visit never leaves half a line behind.
#[derive(Default)]
struct PairCollector {
    pairs: Vec<(String, String)>,
}

impl<'kvs> VisitSource<'kvs> for PairCollector {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), Error> {
        self.pairs.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

pub struct KvConsoleEncoderDeserializer;

impl log4rs::config::Deserialize for KvConsoleEncoderDeserializer {
    type Trait = dyn Encode;
    type Config = KvConsoleEncoderConfig;

    fn deserialize(
        &self,
        config: KvConsoleEncoderConfig,
        _: &log4rs::config::Deserializers,
    ) -> anyhow::Result<Box<dyn Encode>> {
        let pattern = config.pattern.as_deref().unwrap_or("{d} {l} {m}");
        Ok(Box::new(KvConsoleEncoder::new(pattern)))
    }
}
