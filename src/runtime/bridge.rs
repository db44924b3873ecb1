//! Host-facing conversion boundary.
//!
//! A script adapter hands arguments and named context values in through
//! [`Bridge::convert_args`] and [`Bridge::put_context`], and reads results
//! back through [`Bridge::to_host`] and [`Bridge::to_list`]. Each script
//! invocation should own its bridge and tables; nothing here is shared.

use serde::de::DeserializeOwned;

use crate::runtime::{
    config::BridgeConfig,
    convert::{lift_table, lift_value},
    error::BridgeError,
    host_value::HostValue,
    table::Table,
    value::Value,
};

#[derive(Debug, Clone, Default)]
pub struct Bridge {
    config: BridgeConfig,
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Lifts one value; composites become tables, primitives pass through.
    pub fn lift(&self, host: HostValue) -> Result<Value, BridgeError> {
        lift_value(host, &self.config)
    }

    /// Builds a table from a composite host value.
    pub fn lift_table(&self, host: HostValue) -> Result<Table, BridgeError> {
        lift_table(host, &self.config)
    }

    /// Converts call arguments in order.
    pub fn convert_args<I>(&self, args: I) -> Result<Vec<Value>, BridgeError>
    where
        I: IntoIterator<Item = HostValue>,
    {
        args.into_iter().map(|arg| self.lift(arg)).collect()
    }

    /// Injects named values into an environment table, replacing existing
    /// entries. Returns the number of entries written.
    pub fn put_context<I, K>(&self, env: &mut Table, context: I) -> Result<usize, BridgeError>
    where
        I: IntoIterator<Item = (K, HostValue)>,
        K: Into<String>,
    {
        let mut written = 0;
        for (name, host) in context {
            let name = name.into();
            let value = self.lift(host)?;
            tracing::debug!(name = %name, kind = value.type_name(), "injecting context value");
            env.set(Value::from(name), value);
            written += 1;
        }
        Ok(written)
    }

    /// Projects a script result into `T`. The result must be a table.
    pub fn to_host<T: DeserializeOwned>(&self, result: &Value) -> Result<T, BridgeError> {
        expect_table(result)?.project()
    }

    /// Positional view of a script result. The result must be a table.
    pub fn to_list(&self, result: &Value) -> Result<Vec<Value>, BridgeError> {
        Ok(expect_table(result)?.as_list())
    }
}

fn expect_table(value: &Value) -> Result<&Table, BridgeError> {
    value.as_table().map(|table| &**table).ok_or(BridgeError::NotATable {
        type_name: value.type_name(),
    })
}
