//! Contact selection for emergencies
//!
//! Resolves an emergency into a short, prioritised list of responders:
//! the vehicle's predefined contacts first, topped up from the available
//! contacts covering the emergency zone, specialists before generalists.
//!
//! Every operation degrades to an empty value instead of failing, so a
//! broken directory never keeps the caller from alerting whoever could be
//! resolved.

use std::sync::Arc;

use domain::{Contact, ContactSelectionCriteria, DomainError, Vehicle};
use futures::future::join_all;
use tracing::{debug, error, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::DirectoryPort;

/// Upper limit on any selection, whatever the configured policy
pub const MAX_SELECTED_CONTACTS: usize = 5;

/// Bounds on the size of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Below this many contacts the zone is consulted
    pub min_contacts: usize,
    /// Hard cap on the returned list
    pub max_contacts: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            min_contacts: 3,
            max_contacts: 5,
        }
    }
}

impl SelectionPolicy {
    /// Check that the bounds are consistent
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_contacts == 0 {
            return Err(DomainError::ValidationError(
                "max_contacts must be at least 1".to_string(),
            ));
        }
        if self.max_contacts > MAX_SELECTED_CONTACTS {
            return Err(DomainError::ValidationError(format!(
                "max_contacts ({}) exceeds the limit of {MAX_SELECTED_CONTACTS}",
                self.max_contacts
            )));
        }
        if self.min_contacts > self.max_contacts {
            return Err(DomainError::ValidationError(format!(
                "min_contacts ({}) exceeds max_contacts ({})",
                self.min_contacts, self.max_contacts
            )));
        }
        Ok(())
    }
}

/// Service selecting responders for an emergency
pub struct ContactService {
    directory: Arc<dyn DirectoryPort>,
    policy: SelectionPolicy,
}

impl std::fmt::Debug for ContactService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ContactService {
    /// Create a service with the default 3..=5 policy
    #[must_use]
    pub fn new(directory: Arc<dyn DirectoryPort>) -> Self {
        Self::with_policy(directory, SelectionPolicy::default())
    }

    /// Create a service with a custom policy
    #[must_use]
    pub fn with_policy(directory: Arc<dyn DirectoryPort>, policy: SelectionPolicy) -> Self {
        Self { directory, policy }
    }

    /// Active selection policy
    #[must_use]
    pub const fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Fetch a vehicle, `None` when missing or on any failure
    #[instrument(skip(self))]
    pub async fn get_vehicle_by_id(&self, vehicle_id: &str) -> Option<Vehicle> {
        match self.directory.get_vehicle(vehicle_id).await {
            Ok(vehicle) => Some(vehicle),
            Err(e) => {
                warn!(vehicle_id, error = %e, "Failed to get vehicle");
                None
            },
        }
    }

    /// Fetch a contact, `None` when missing or on any failure
    #[instrument(skip(self))]
    pub async fn get_contact_by_id(&self, contact_id: &str) -> Option<Contact> {
        match self.directory.get_contact(contact_id).await {
            Ok(contact) => Some(contact),
            Err(e) => {
                warn!(contact_id, error = %e, "Failed to get contact");
                None
            },
        }
    }

    /// List available contacts, empty on failure
    #[instrument(skip(self))]
    pub async fn get_available_contacts(&self) -> Vec<Contact> {
        self.directory
            .list_available_contacts()
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to get available contacts");
                Vec::new()
            })
    }

    /// List contacts covering a location's zone, empty on failure
    #[instrument(skip(self))]
    pub async fn find_contacts_in_zone(&self, location: &str) -> Vec<Contact> {
        self.directory
            .find_contacts_in_zone(location)
            .await
            .unwrap_or_else(|e| {
                warn!(location, error = %e, "Failed to find contacts in zone");
                Vec::new()
            })
    }

    /// Select at most `max_contacts` responders, sorted by ascending priority
    ///
    /// Never fails: an inconsistent pipeline is logged and yields an empty
    /// list. An under-filled list is a valid result.
    #[instrument(skip(self, criteria), fields(
        emergency_type = %criteria.emergency_type,
        location = %criteria.location,
        vehicle_id = ?criteria.vehicle_id,
    ))]
    pub async fn select_contacts_for_emergency(
        &self,
        criteria: &ContactSelectionCriteria,
    ) -> Vec<Contact> {
        match self.try_select(criteria).await {
            Ok(selected) => {
                info!(count = selected.len(), "Selected contacts for emergency");
                selected
            },
            Err(e) => {
                error!(error = %e, "Failed to select contacts for emergency");
                Vec::new()
            },
        }
    }

    async fn try_select(
        &self,
        criteria: &ContactSelectionCriteria,
    ) -> Result<Vec<Contact>, ApplicationError> {
        self.policy.validate()?;

        let mut selected = match &criteria.vehicle_id {
            Some(vehicle_id) => self.vehicle_seed(vehicle_id).await,
            None => Vec::new(),
        };

        if selected.len() < self.policy.min_contacts {
            let zone_contacts = self.find_contacts_in_zone(&criteria.location).await;
            let available: Vec<&Contact> =
                zone_contacts.iter().filter(|c| c.is_available).collect();

            let specialised = available.iter().copied().filter(|c| {
                c.is_qualified_for(criteria.emergency_type, &criteria.required_specialties)
            });
            self.append_missing(&mut selected, specialised);

            if selected.len() < self.policy.min_contacts {
                self.append_missing(&mut selected, available.iter().copied());
            }

            debug!(
                zone_contacts = zone_contacts.len(),
                available = available.len(),
                selected = selected.len(),
                "Topped up selection from zone"
            );
        }

        selected.sort_by_key(|c| c.priority);
        Ok(selected)
    }

    /// Resolve a vehicle's predefined contacts concurrently, in the vehicle's order
    async fn vehicle_seed(&self, vehicle_id: &str) -> Vec<Contact> {
        let Some(vehicle) = self.get_vehicle_by_id(vehicle_id).await else {
            return Vec::new();
        };
        if vehicle.emergency_contacts.is_empty() {
            debug!(vehicle_id, "Vehicle has no predefined contacts");
            return Vec::new();
        }

        let lookups = vehicle
            .emergency_contacts
            .iter()
            .map(|id| self.get_contact_by_id(id));
        let resolved = join_all(lookups).await;

        let mut seed = Vec::with_capacity(resolved.len());
        self.append_missing(&mut seed, resolved.iter().flatten());
        debug!(
            vehicle_id,
            predefined = vehicle.emergency_contacts.len(),
            resolved = seed.len(),
            "Resolved vehicle contacts"
        );
        seed
    }

    /// Append contacts not yet present (by id) until the cap is reached
    fn append_missing<'a>(
        &self,
        selected: &mut Vec<Contact>,
        candidates: impl IntoIterator<Item = &'a Contact>,
    ) {
        for candidate in candidates {
            if selected.len() >= self.policy.max_contacts {
                break;
            }
            if !selected.iter().any(|c| c.id == candidate.id) {
                selected.push(candidate.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::{EmergencyType, Vehicle};
    use mockall::predicate::eq;

    use super::*;
    use crate::ports::MockDirectoryPort;

    fn contact(id: &str, priority: i32) -> Contact {
        Contact::new(id, format!("Contact {id}"), priority)
    }

    fn medic(id: &str, priority: i32) -> Contact {
        contact(id, priority).with_specialty("medical")
    }

    fn ids(contacts: &[Contact]) -> Vec<&str> {
        contacts.iter().map(|c| c.id.as_str()).collect()
    }

    fn service(mock: MockDirectoryPort) -> ContactService {
        ContactService::new(Arc::new(mock))
    }

    fn expect_vehicle_contacts(mock: &mut MockDirectoryPort, contacts: Vec<Contact>) {
        let contact_ids: Vec<String> = contacts.iter().map(|c| c.id.clone()).collect();
        mock.expect_get_vehicle()
            .with(eq("V1"))
            .returning(move |_| Ok(Vehicle::new("V1", contact_ids.clone())));
        mock.expect_get_contact().returning(move |id| {
            contacts
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| ApplicationError::NotFound(format!("contact {id}")))
        });
    }

    #[tokio::test]
    async fn get_vehicle_returns_none_on_failure() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_get_vehicle()
            .returning(|_| Err(ApplicationError::ExternalService("down".into())));

        assert!(service(mock).get_vehicle_by_id("V1").await.is_none());
    }

    #[tokio::test]
    async fn get_contact_returns_none_when_missing() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_get_contact()
            .returning(|id| Err(ApplicationError::NotFound(id.to_string())));

        assert!(service(mock).get_contact_by_id("c9").await.is_none());
    }

    #[tokio::test]
    async fn listings_are_empty_on_failure() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_list_available_contacts()
            .returning(|| Err(ApplicationError::ExternalService("timeout".into())));
        mock.expect_find_contacts_in_zone()
            .returning(|_| Err(ApplicationError::RateLimited));

        let service = service(mock);
        assert!(service.get_available_contacts().await.is_empty());
        assert!(service.find_contacts_in_zone("Lyon").await.is_empty());
    }

    #[tokio::test]
    async fn vehicle_with_three_contacts_skips_zone_lookup() {
        let mut mock = MockDirectoryPort::new();
        expect_vehicle_contacts(
            &mut mock,
            vec![contact("c1", 3), contact("c2", 1), contact("c3", 2)],
        );
        mock.expect_find_contacts_in_zone().never();

        let criteria = ContactSelectionCriteria::new(EmergencyType::Medical, "Lyon").with_vehicle("V1");
        let selected = service(mock).select_contacts_for_emergency(&criteria).await;

        assert_eq!(ids(&selected), vec!["c2", "c3", "c1"]);
    }

    #[tokio::test]
    async fn unresolvable_vehicle_contacts_are_dropped() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_get_vehicle()
            .returning(|_| Ok(Vehicle::new("V1", ["c1", "ghost", "c2"])));
        mock.expect_get_contact().returning(|id| match id {
            "c1" => Ok(contact("c1", 1)),
            "c2" => Ok(contact("c2", 2)),
            other => Err(ApplicationError::NotFound(other.to_string())),
        });
        mock.expect_find_contacts_in_zone()
            .with(eq("Lyon"))
            .times(1)
            .returning(|_| Ok(vec![medic("z1", 5)]));

        let criteria = ContactSelectionCriteria::new(EmergencyType::Medical, "Lyon").with_vehicle("V1");
        let selected = service(mock).select_contacts_for_emergency(&criteria).await;

        assert_eq!(ids(&selected), vec!["c1", "c2", "z1"]);
    }

    #[tokio::test]
    async fn zone_contacts_are_all_taken_when_under_the_cap() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_find_contacts_in_zone().returning(|_| {
            Ok(vec![
                contact("g1", 3),
                medic("m1", 1),
                contact("g2", 4),
                medic("m2", 2),
            ])
        });

        let criteria = ContactSelectionCriteria::new(EmergencyType::Medical, "Paris");
        let selected = service(mock).select_contacts_for_emergency(&criteria).await;

        assert_eq!(ids(&selected), vec!["m1", "m2", "g1", "g2"]);
    }

    #[tokio::test]
    async fn specialists_win_slots_over_better_ranked_generalists() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_find_contacts_in_zone().returning(|_| {
            Ok(vec![
                contact("g1", 1),
                contact("g2", 2),
                contact("g3", 3),
                contact("g4", 4),
                medic("m1", 8),
                medic("m2", 9),
            ])
        });

        let criteria = ContactSelectionCriteria::new(EmergencyType::Medical, "Paris");
        let selected = service(mock).select_contacts_for_emergency(&criteria).await;

        assert_eq!(ids(&selected), vec!["g1", "g2", "g3", "m1", "m2"]);
    }

    #[tokio::test]
    async fn enough_specialists_exclude_generalists() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_find_contacts_in_zone().returning(|_| {
            Ok(vec![
                contact("g1", 0),
                medic("m1", 1),
                medic("m2", 2),
                medic("m3", 3),
            ])
        });

        let criteria = ContactSelectionCriteria::new(EmergencyType::Medical, "Paris");
        let selected = service(mock).select_contacts_for_emergency(&criteria).await;

        assert_eq!(ids(&selected), vec!["m1", "m2", "m3"]);
    }

    #[tokio::test]
    async fn specialists_fill_up_to_the_cap() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_find_contacts_in_zone().returning(|_| {
            Ok((1..=7).map(|i| medic(&format!("m{i}"), 10 - i)).collect())
        });

        let criteria = ContactSelectionCriteria::new(EmergencyType::Medical, "Paris");
        let selected = service(mock).select_contacts_for_emergency(&criteria).await;

        assert_eq!(selected.len(), 5);
        assert_eq!(ids(&selected), vec!["m5", "m4", "m3", "m2", "m1"]);
    }

    #[tokio::test]
    async fn unavailable_zone_contacts_are_ignored() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_find_contacts_in_zone().returning(|_| {
            Ok(vec![
                medic("m1", 1).with_availability(false),
                contact("g1", 2),
            ])
        });

        let criteria = ContactSelectionCriteria::new(EmergencyType::Medical, "Paris");
        let selected = service(mock).select_contacts_for_emergency(&criteria).await;

        assert_eq!(ids(&selected), vec!["g1"]);
    }

    #[tokio::test]
    async fn seed_contacts_are_not_duplicated_from_zone() {
        let mut mock = MockDirectoryPort::new();
        expect_vehicle_contacts(&mut mock, vec![medic("c1", 2)]);
        mock.expect_find_contacts_in_zone()
            .returning(|_| Ok(vec![medic("c1", 2), medic("m1", 1), contact("g1", 3)]));

        let criteria = ContactSelectionCriteria::new(EmergencyType::Medical, "Paris").with_vehicle("V1");
        let selected = service(mock).select_contacts_for_emergency(&criteria).await;

        assert_eq!(ids(&selected), vec!["m1", "c1", "g1"]);
    }

    #[tokio::test]
    async fn duplicate_and_oversized_vehicle_lists_are_bounded() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_get_vehicle().returning(|_| {
            Ok(Vehicle::new("V1", ["c1", "c1", "c2", "c3", "c4", "c5", "c6"]))
        });
        mock.expect_get_contact().returning(|id| {
            let rank = id.trim_start_matches('c').parse::<i32>().unwrap_or(99);
            Ok(contact(id, 10 - rank))
        });
        mock.expect_find_contacts_in_zone().never();

        let criteria = ContactSelectionCriteria::new(EmergencyType::Security, "Paris").with_vehicle("V1");
        let selected = service(mock).select_contacts_for_emergency(&criteria).await;

        assert_eq!(ids(&selected), vec!["c5", "c4", "c3", "c2", "c1"]);
    }

    #[tokio::test]
    async fn missing_vehicle_falls_back_to_zone() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_get_vehicle()
            .returning(|id| Err(ApplicationError::NotFound(id.to_string())));
        mock.expect_find_contacts_in_zone()
            .returning(|_| Ok(vec![contact("g1", 1)]));

        let criteria = ContactSelectionCriteria::new(EmergencyType::Technical, "Paris").with_vehicle("V1");
        let selected = service(mock).select_contacts_for_emergency(&criteria).await;

        assert_eq!(ids(&selected), vec!["g1"]);
    }

    #[tokio::test]
    async fn required_specialties_narrow_the_specialist_tier() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_find_contacts_in_zone().returning(|_| {
            Ok(vec![
                medic("m1", 1),
                medic("m2", 2).with_specialty("hazmat"),
                contact("g1", 3),
                contact("g2", 4),
                contact("g3", 5),
            ])
        });

        let criteria = ContactSelectionCriteria::new(EmergencyType::Medical, "Paris")
            .with_required_specialty("hazmat");
        let selected = service(mock).select_contacts_for_emergency(&criteria).await;

        // m2 is the only specialist; the rest of the zone tops up to the cap
        assert_eq!(ids(&selected), vec!["m1", "m2", "g1", "g2", "g3"]);
    }

    #[tokio::test]
    async fn invalid_policy_yields_empty_selection() {
        let mut mock = MockDirectoryPort::new();
        mock.expect_find_contacts_in_zone().never();
        let policy = SelectionPolicy {
            min_contacts: 6,
            max_contacts: 5,
        };
        let service = ContactService::with_policy(Arc::new(mock), policy);

        let criteria = ContactSelectionCriteria::new(EmergencyType::Medical, "Paris");
        assert!(service.select_contacts_for_emergency(&criteria).await.is_empty());
    }

    #[test]
    fn policy_validation() {
        assert!(SelectionPolicy::default().validate().is_ok());
        assert!(
            SelectionPolicy {
                min_contacts: 0,
                max_contacts: 0
            }
            .validate()
            .is_err()
        );
        assert!(
            SelectionPolicy {
                min_contacts: 4,
                max_contacts: 3
            }
            .validate()
            .is_err()
        );
        assert!(
            SelectionPolicy {
                min_contacts: 3,
                max_contacts: 10
            }
            .validate()
            .is_err()
        );
        assert!(
            SelectionPolicy {
                min_contacts: 1,
                max_contacts: MAX_SELECTED_CONTACTS
            }
            .validate()
            .is_ok()
        );
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn zone_contact() -> impl Strategy<Value = Contact> {
            (0u8..12, -5i32..20, any::<bool>(), any::<bool>()).prop_map(
                |(id, priority, available, is_medic)| {
                    let c = contact(&format!("z{id}"), priority).with_availability(available);
                    if is_medic { c.with_specialty("medical") } else { c }
                },
            )
        }

        proptest! {
            #[test]
            fn selection_is_bounded_sorted_and_unique(
                zone in proptest::collection::vec(zone_contact(), 0..15),
            ) {
                let mut mock = MockDirectoryPort::new();
                mock.expect_find_contacts_in_zone()
                    .returning(move |_| Ok(zone.clone()));

                let criteria = ContactSelectionCriteria::new(EmergencyType::Medical, "Paris");
                let selected = tokio_test::block_on(
                    service(mock).select_contacts_for_emergency(&criteria),
                );

                prop_assert!(selected.len() <= 5);
                prop_assert!(selected.windows(2).all(|w| w[0].priority <= w[1].priority));
                prop_assert!(selected.iter().all(|c| c.is_available));
                let mut seen: Vec<&str> = ids(&selected);
                seen.sort_unstable();
                seen.dedup();
                prop_assert_eq!(seen.len(), selected.len());
            }
        }
    }
}
