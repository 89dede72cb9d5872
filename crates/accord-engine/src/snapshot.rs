use accord_types::{Address, AgreementRecord, PartnerRecord};
use std::collections::BTreeMap;

/// The records the host loaded for one operation.
///
/// An immutable view: the engine reads it, never writes it. A missing key
/// means the record does not exist in the store: the host must load every
/// address the operation could touch, so absence here is proof of absence,
/// not an incomplete load.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    partners: BTreeMap<Address, PartnerRecord>,
    agreements: BTreeMap<Address, AgreementRecord>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_partner(&mut self, address: Address, record: PartnerRecord) {
        self.partners.insert(address, record);
    }

    pub fn insert_agreement(&mut self, address: Address, record: AgreementRecord) {
        self.agreements.insert(address, record);
    }

    pub fn remove_partner(&mut self, address: Address) -> Option<PartnerRecord> {
        self.partners.remove(&address)
    }

    pub fn remove_agreement(&mut self, address: Address) -> Option<AgreementRecord> {
        self.agreements.remove(&address)
    }

    pub fn partner(&self, address: Address) -> Option<&PartnerRecord> {
        self.partners.get(&address)
    }

    pub fn agreement(&self, address: Address) -> Option<&AgreementRecord> {
        self.agreements.get(&address)
    }
}
