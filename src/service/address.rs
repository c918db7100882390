use super::base::GenericService;
use entity_store::AddressStore;

/// Address operations. Field rules (non-empty locality and region) live in
/// `Address`'s `Validate` implementation, which the generic service applies.
pub type AddressService = GenericService<AddressStore>;
