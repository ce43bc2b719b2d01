mod budget;
pub(crate) mod category;
mod transaction;

pub(crate) use budget::Budget;
pub(crate) use transaction::{
    parse_amount, NewTransaction, Transaction, TransactionDraft, TransactionType,
    DEFAULT_DESCRIPTION,
};

#[cfg(test)]
pub(crate) use transaction::parse_date;

#[cfg(test)]
mod tests;
