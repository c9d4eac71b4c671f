use crate::{
    account::{Account, AccountType, Bank, User, UserId},
    id::encrypt_id,
    logging::Redacted,
};

pub(crate) fn user() -> User {
    User {
        id: UserId::new("user_1"),
        email: "jane@example.com".to_owned(),
        first_name: "Jane".to_owned(),
        last_name: "Doe".to_owned(),
        customer_id: "cus_1".to_owned(),
        customer_url: "https://payments.test/customers/cus_1".to_owned(),
    }
}

pub(crate) fn account(id: &str, item_id: &str, current_balance: f64) -> Account {
    Account {
        id: id.to_owned(),
        name: "Plaid Checking".to_owned(),
        official_name: Some("Plaid Gold Standard 0% Interest Checking".to_owned()),
        mask: "0000".to_owned(),
        institution_id: "ins_109508".to_owned(),
        available_balance: current_balance,
        current_balance,
        kind: AccountType::Depository,
        subtype: "checking".to_owned(),
        item_id: item_id.to_owned(),
        shareable_id: encrypt_id(id),
    }
}

/// A stored bank link whose funding source is numbered after the account,
/// e.g. "acc_2" gets ".../funding-sources/fs_2".
pub(crate) fn bank(account_id: &str, item_id: &str) -> Bank {
    let suffix = account_id.trim_start_matches("acc_");

    Bank {
        id: format!("bank_{suffix}"),
        user_id: UserId::new("user_1"),
        bank_id: item_id.to_owned(),
        account_id: account_id.to_owned(),
        access_token: Redacted(format!("access-sandbox-{suffix}")),
        funding_source_url: format!("https://payments.test/funding-sources/fs_{suffix}"),
        shareable_id: encrypt_id(account_id),
    }
}
