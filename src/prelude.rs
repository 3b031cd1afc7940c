pub(crate) use anyhow::{anyhow, bail, Context as _, Error, Result};
pub(crate) use tracing::{debug, info, trace, warn};
