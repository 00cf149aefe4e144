//! Audit history command

use clap::{Args, ValueEnum};

use crate::audit::{EntityType, HistoryFilter};
use crate::error::BudgeeResult;
use crate::storage::Storage;

/// Kind of entity to show history for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryEntity {
    Person,
    Income,
    Expense,
    /// Links between people and transactions
    #[value(alias = "link")]
    Association,
}

impl From<HistoryEntity> for EntityType {
    fn from(entity: HistoryEntity) -> Self {
        match entity {
            HistoryEntity::Person => EntityType::Person,
            HistoryEntity::Income => EntityType::Income,
            HistoryEntity::Expense => EntityType::Expense,
            HistoryEntity::Association => EntityType::Association,
        }
    }
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Only show changes to this kind of entity
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub entity_type: Option<HistoryEntity>,

    /// Only show changes to the person or transaction with this name,
    /// including its links
    #[arg(short, long)]
    pub name: Option<String>,
}

impl HistoryArgs {
    fn filter(&self) -> HistoryFilter {
        HistoryFilter {
            entity_type: self.entity_type.map(EntityType::from),
            name: self.name.clone(),
        }
    }
}

/// Print the most recent matching audit entries, oldest first
pub fn handle_history_command(storage: &Storage, args: &HistoryArgs) -> BudgeeResult<()> {
    let Some(logger) = storage.audit() else {
        println!("Audit logging is disabled.");
        return Ok(());
    };

    let entries = logger.read_recent(&args.filter(), args.limit)?;
    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
