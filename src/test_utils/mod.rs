#![allow(missing_docs)]

pub(crate) mod fakes;
pub(crate) mod fixtures;

pub(crate) use fakes::{FakeDirectory, FakeLedger, FakeLink, FakeRegistrar, FakeTransfers};
pub(crate) use fixtures::{account, bank, user};
