//! In-memory stand-ins for the external services.

use std::{cell::RefCell, collections::HashMap};

use crate::{
    Error,
    account::{Account, AccountDirectory, Bank, User, UserId},
    ledger::TransactionLedger,
    link::{AccessGrant, LinkExchange, LinkTokenRequest, LinkedAccount, NewBank},
    logging::Redacted,
    registration::{NewCustomer, Registrar},
    transaction::Transaction,
    transfer::{TransferInitiator, TransferLocation, TransferRequest},
};

#[derive(Default)]
pub(crate) struct FakeDirectory {
    user: Option<User>,
    accounts: Vec<Account>,
    banks: Vec<Bank>,
}

impl FakeDirectory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub(crate) fn with_account(mut self, account: Account, bank: Bank) -> Self {
        self.accounts.push(account);
        self.banks.push(bank);
        self
    }
}

impl AccountDirectory for FakeDirectory {
    fn logged_in_user(&self) -> Result<User, Error> {
        self.user.clone().ok_or(Error::NotAuthenticated)
    }

    fn accounts(&self, _user: &UserId) -> Result<Vec<Account>, Error> {
        Ok(self.accounts.clone())
    }

    fn account(&self, item_id: &str) -> Result<Account, Error> {
        self.accounts
            .iter()
            .find(|account| account.item_id == item_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn bank(&self, item_id: &str) -> Result<Bank, Error> {
        self.banks
            .iter()
            .find(|bank| bank.bank_id == item_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn bank_by_account_id(&self, account_id: &str) -> Result<Bank, Error> {
        self.banks
            .iter()
            .find(|bank| bank.account_id == account_id)
            .cloned()
            .ok_or(Error::NotFound)
    }
}

/// Returns [Error::NotFound] for items without any registered transactions.
#[derive(Default)]
pub(crate) struct FakeLedger {
    transactions: HashMap<String, Vec<Transaction>>,
}

impl FakeLedger {
    pub(crate) fn with_transactions(
        mut self,
        item_id: &str,
        transactions: Vec<Transaction>,
    ) -> Self {
        self.transactions.insert(item_id.to_owned(), transactions);
        self
    }
}

impl TransactionLedger for FakeLedger {
    fn transactions(&self, item_id: &str) -> Result<Vec<Transaction>, Error> {
        self.transactions.get(item_id).cloned().ok_or(Error::NotFound)
    }
}

/// Links "acc_1" ("Plaid Checking") through "item_1".
#[derive(Default)]
pub(crate) struct FakeLink {
    fail_exchange: bool,
    without_funding_source: bool,
    link_token_requests: RefCell<Vec<LinkTokenRequest>>,
    funding_source_requests: RefCell<Vec<(String, String, String)>>,
    saved_banks: RefCell<Vec<Bank>>,
}

impl FakeLink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_exchange(mut self) -> Self {
        self.fail_exchange = true;
        self
    }

    pub(crate) fn without_funding_source(mut self) -> Self {
        self.without_funding_source = true;
        self
    }

    pub(crate) fn link_token_requests(&self) -> Vec<LinkTokenRequest> {
        self.link_token_requests.borrow().clone()
    }

    pub(crate) fn funding_source_requests(&self) -> Vec<(String, String, String)> {
        self.funding_source_requests.borrow().clone()
    }

    pub(crate) fn saved_banks(&self) -> Vec<Bank> {
        self.saved_banks.borrow().clone()
    }
}

impl LinkExchange for FakeLink {
    fn create_link_token(&self, request: &LinkTokenRequest) -> Result<String, Error> {
        self.link_token_requests.borrow_mut().push(request.clone());

        Ok(format!("link-sandbox-{}", request.client_user_id))
    }

    fn exchange_public_token(&self, _public_token: &str) -> Result<AccessGrant, Error> {
        if self.fail_exchange {
            return Err(Error::upstream("aggregator", "INVALID_PUBLIC_TOKEN"));
        }

        Ok(AccessGrant {
            access_token: Redacted("access-sandbox-1".to_owned()),
            item_id: "item_1".to_owned(),
        })
    }

    fn primary_account(&self, _access_token: &str) -> Result<LinkedAccount, Error> {
        Ok(LinkedAccount {
            account_id: "acc_1".to_owned(),
            name: "Plaid Checking".to_owned(),
        })
    }

    fn create_processor_token(
        &self,
        _access_token: &str,
        account_id: &str,
    ) -> Result<String, Error> {
        Ok(format!("processor-{account_id}"))
    }

    fn add_funding_source(
        &self,
        customer_id: &str,
        processor_token: &str,
        bank_name: &str,
    ) -> Result<String, Error> {
        self.funding_source_requests.borrow_mut().push((
            customer_id.to_owned(),
            processor_token.to_owned(),
            bank_name.to_owned(),
        ));

        if self.without_funding_source {
            Ok(String::new())
        } else {
            Ok("https://payments.test/funding-sources/fs_1".to_owned())
        }
    }

    fn save_bank(&self, bank: NewBank) -> Result<Bank, Error> {
        let mut saved_banks = self.saved_banks.borrow_mut();
        let bank = Bank {
            id: format!("bank_{}", saved_banks.len() + 1),
            user_id: bank.user_id,
            bank_id: bank.bank_id,
            account_id: bank.account_id,
            access_token: bank.access_token,
            funding_source_url: bank.funding_source_url,
            shareable_id: bank.shareable_id,
        };
        saved_banks.push(bank.clone());

        Ok(bank)
    }
}

/// Records submitted transfers and numbers them "tr_1", "tr_2", ...
#[derive(Default)]
pub(crate) struct FakeTransfers {
    requests: RefCell<Vec<TransferRequest>>,
}

impl FakeTransfers {
    pub(crate) fn requests(&self) -> Vec<TransferRequest> {
        self.requests.borrow().clone()
    }
}

impl TransferInitiator for FakeTransfers {
    fn create_transfer(&self, request: &TransferRequest) -> Result<TransferLocation, Error> {
        let mut requests = self.requests.borrow_mut();
        requests.push(request.clone());

        Ok(TransferLocation::new(format!(
            "https://payments.test/transfers/tr_{}",
            requests.len()
        )))
    }
}

/// Creates "user_1" with the customer "https://payments.test/customers/cus_1".
#[derive(Default)]
pub(crate) struct FakeRegistrar {
    user: Option<User>,
    fail_auth: bool,
    without_customer_url: bool,
    auth_users: RefCell<Vec<(String, String)>>,
    customers: RefCell<Vec<NewCustomer>>,
    saved_users: RefCell<Vec<User>>,
    sessions: RefCell<Vec<String>>,
}

impl FakeRegistrar {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub(crate) fn fail_auth(mut self) -> Self {
        self.fail_auth = true;
        self
    }

    pub(crate) fn without_customer_url(mut self) -> Self {
        self.without_customer_url = true;
        self
    }

    /// The email and name of each login created.
    pub(crate) fn auth_users(&self) -> Vec<(String, String)> {
        self.auth_users.borrow().clone()
    }

    pub(crate) fn customers(&self) -> Vec<NewCustomer> {
        self.customers.borrow().clone()
    }

    pub(crate) fn saved_users(&self) -> Vec<User> {
        self.saved_users.borrow().clone()
    }

    /// The email of each session started.
    pub(crate) fn sessions(&self) -> Vec<String> {
        self.sessions.borrow().clone()
    }
}

impl Registrar for FakeRegistrar {
    fn create_auth_user(&self, email: &str, _password: &str, name: &str) -> Result<UserId, Error> {
        if self.fail_auth {
            return Err(Error::upstream("auth", "user already exists"));
        }

        self.auth_users
            .borrow_mut()
            .push((email.to_owned(), name.to_owned()));

        Ok(UserId::new("user_1"))
    }

    fn create_customer(&self, customer: &NewCustomer) -> Result<String, Error> {
        self.customers.borrow_mut().push(customer.clone());

        if self.without_customer_url {
            Ok(String::new())
        } else {
            Ok("https://payments.test/customers/cus_1".to_owned())
        }
    }

    fn save_user(&self, user: User) -> Result<User, Error> {
        self.saved_users.borrow_mut().push(user.clone());

        Ok(user)
    }

    fn start_session(&self, email: &str, _password: &str) -> Result<UserId, Error> {
        if self.fail_auth {
            return Err(Error::upstream("auth", "invalid credentials"));
        }

        self.sessions.borrow_mut().push(email.to_owned());

        Ok(UserId::new("user_1"))
    }

    fn user(&self, user_id: &UserId) -> Result<User, Error> {
        self.user
            .clone()
            .into_iter()
            .chain(self.saved_users.borrow().iter().cloned())
            .find(|user| &user.id == user_id)
            .ok_or(Error::NotFound)
    }
}
