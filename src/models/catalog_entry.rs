use derive_getters::Getters;
use derive_new::new;

use super::FundId;

#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct CatalogEntry {
    name: String,
    id: FundId,
}
