use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock},
    time::Duration,
};

use anyhow::{anyhow, Result};
use cucumber::World;
use log::{debug, info, warn};
use lto_common::{
    api::NodeApi,
    config::{COIN_VALUE, TESTNET_CHAIN_ID},
    crypto::Account,
};

use crate::{config::Settings, memory_node::MemoryNode};

// Root of the in-memory node used when no target is installed
pub const MEMORY_ROOT_SEED: &str = "in-memory root";
pub const MEMORY_ROOT_BALANCE: u64 = 1_000_000 * COIN_VALUE;

static TARGET: OnceLock<Target> = OnceLock::new();

/// Result of the last transaction a step submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    Confirmed { id: String },
    Failed { error: String },
}

impl TxOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, TxOutcome::Confirmed { .. })
    }
}

impl fmt::Display for TxOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxOutcome::Confirmed { id } => write!(f, "confirmed ({})", id),
            TxOutcome::Failed { error } => write!(f, "failed ({})", error),
        }
    }
}

/// How long to wait for the node to see a broadcast transaction
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl From<&Settings> for PollConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            interval: settings.poll_interval(),
            timeout: settings.confirmation_timeout(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// Node and root account every scenario of a run talks to
#[derive(Clone)]
pub struct Target {
    pub node: Arc<dyn NodeApi>,
    pub root: Account,
    pub poll: PollConfig,
}

impl Target {
    pub fn new(node: Arc<dyn NodeApi>, root: Account, poll: PollConfig) -> Self {
        Self { node, root, poll }
    }

    /// A fresh [`MemoryNode`] whose genesis gives `balance` units to root
    pub fn in_memory(root: Account, balance: u64, poll: PollConfig) -> Self {
        let node = MemoryNode::with_balance(root.address(), balance);
        Self::new(Arc::new(node), root, poll)
    }

    /// Make this the target of every scenario created from now on.
    ///
    /// Only one target can be installed per process.
    pub fn install(self) -> Result<()> {
        let root = *self.root.address();
        TARGET
            .set(self)
            .map_err(|_| anyhow!("A scenario target is already installed"))?;
        info!("Scenarios run with root {}", root);
        Ok(())
    }

    /// The installed target, or an in-memory one when none was installed
    pub fn current() -> &'static Target {
        TARGET.get_or_init(|| {
            let root = Account::from_seed(MEMORY_ROOT_SEED, TESTNET_CHAIN_ID);
            Target::in_memory(root, MEMORY_ROOT_BALANCE, PollConfig::default())
        })
    }
}

/// State of one scenario run. Created at setup, dropped at teardown.
#[derive(World)]
#[world(init = Self::for_target)]
pub struct ScenarioContext {
    node: Arc<dyn NodeApi>,
    root: Account,
    poll: PollConfig,
    users: HashMap<String, Account>,
    last_outcome: Option<TxOutcome>,
}

impl fmt::Debug for ScenarioContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut users: Vec<_> = self
            .users
            .iter()
            .map(|(name, account)| format!("{}={}", name, account.address()))
            .collect();
        users.sort();

        f.debug_struct("ScenarioContext")
            .field("root", &self.root.address().to_string())
            .field("users", &users)
            .field("last_outcome", &self.last_outcome)
            .finish()
    }
}

impl ScenarioContext {
    pub fn new(node: Arc<dyn NodeApi>, root: Account, poll: PollConfig) -> Self {
        Self {
            node,
            root,
            poll,
            users: HashMap::new(),
            last_outcome: None,
        }
    }

    /// Empty context on the current [`Target`]
    pub fn for_target() -> Self {
        let target = Target::current();
        Self::new(target.node.clone(), target.root.clone(), target.poll)
    }

    pub fn node(&self) -> &dyn NodeApi {
        self.node.as_ref()
    }

    /// Account that funds every actor
    pub fn root(&self) -> &Account {
        &self.root
    }

    pub fn chain_id(&self) -> u8 {
        self.root.chain_id()
    }

    pub fn poll(&self) -> PollConfig {
        self.poll
    }

    pub fn user(&self, name: &str) -> Result<&Account> {
        self.users
            .get(name)
            .ok_or_else(|| anyhow!("Unknown actor '{}'", name))
    }

    /// A named actor, or root when no name is given
    pub fn account(&self, name: Option<&str>) -> Result<&Account> {
        match name {
            Some(name) if !name.is_empty() => self.user(name),
            _ => Ok(&self.root),
        }
    }

    /// Register an actor, replacing any previous account of that name
    pub fn add_user(&mut self, name: impl Into<String>, account: Account) -> &Account {
        let name = name.into();
        debug!("Actor '{}' is {}", name, account.address());
        self.users.insert(name.clone(), account);
        &self.users[&name]
    }

    pub fn last_outcome(&self) -> Option<&TxOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn record(&mut self, outcome: TxOutcome) {
        debug!("Transaction {}", outcome);
        self.last_outcome = Some(outcome);
    }

    /// Direct step: record the confirmation, propagate the error
    pub fn confirm(&mut self, result: Result<String>) -> Result<()> {
        let id = result?;
        self.record(TxOutcome::Confirmed { id });
        Ok(())
    }

    /// Speculative step: record the outcome, never fail
    pub fn attempt(&mut self, result: Result<String>) {
        match result {
            Ok(id) => self.record(TxOutcome::Confirmed { id }),
            Err(e) => {
                warn!("Attempted transaction failed: {:#}", e);
                self.record(TxOutcome::Failed {
                    error: format!("{:#}", e),
                });
            }
        }
    }
}
