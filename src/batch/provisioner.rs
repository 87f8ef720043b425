// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The batch provisioning loop.

use crate::error::Result;
use crate::event::{BatchId, EventBus, ProvisionEvent};
use crate::naming::NamingPolicy;
use crate::state::logical_to_raw;

use super::{
    BatchFailure, BatchRequest, BatchResult, DeviceRegistry, FailureStage, ProvisioningContext,
};

/// Creates batches of devices through a [`DeviceRegistry`].
///
/// The provisioner holds no state between batches apart from its
/// configuration.
#[derive(Debug)]
pub struct BatchProvisioner<R> {
    registry: R,
    naming: Option<NamingPolicy>,
    event_bus: Option<EventBus>,
}

impl<R: DeviceRegistry> BatchProvisioner<R> {
    /// Creates a provisioner backed by `registry`.
    #[must_use]
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            naming: None,
            event_bus: None,
        }
    }

    /// Overrides the naming policy. By default each kind uses
    /// [`NamingPolicy::for_kind`].
    #[must_use]
    pub fn with_naming_policy(mut self, policy: NamingPolicy) -> Self {
        self.naming = Some(policy);
        self
    }

    /// Publishes progress events on `bus`.
    #[must_use]
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Runs one batch.
    ///
    /// Addresses are attempted strictly in increasing order and each registry
    /// call is awaited before the next one starts. Failures are collected in
    /// the returned [`BatchResult`]; they never stop the batch.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the request fails validation. No registry
    /// call is made in that case.
    pub async fn provision(
        &self,
        request: &BatchRequest,
        context: &ProvisioningContext,
    ) -> Result<BatchResult> {
        let (first, last) = request.validate(context)?;

        let kind = request.kind();
        let policy = self.naming.unwrap_or(NamingPolicy::for_kind(kind));
        let inverted = request.inverted();
        let batch_id = BatchId::new();
        let count = request.clamped_count();

        tracing::info!(
            %batch_id,
            %kind,
            prefix = request.prefix(),
            first,
            count,
            "Starting batch"
        );
        self.publish(ProvisionEvent::Started {
            batch_id,
            kind,
            count,
        });

        let mut taken = context.existing().clone();
        let mut result = BatchResult::default();

        for (index, address) in (first..=last).enumerate() {
            let identifier = request.identifier_for(address);
            let display_name =
                policy.suggest(request.base_display_name(), &taken, index == 0, || {
                    address.to_string()
                });
            let fields = request.fields_for(address);

            tracing::debug!(%batch_id, address, %identifier, %display_name, "Creating device");

            if let Err(err) = self
                .registry
                .create_device(kind, &identifier, Some(&display_name), &fields)
                .await
            {
                let failure = BatchFailure::new(address, &identifier, FailureStage::Create, &err);
                self.fail(&mut result, batch_id, failure);
                continue;
            }
            taken.reserve(&identifier, Some(&display_name), policy.scope());

            if let Some(state) = request.desired_state() {
                let raw = logical_to_raw(state, inverted);
                if let Err(err) = self.registry.set_state(kind, &identifier, raw).await {
                    let failure =
                        BatchFailure::new(address, &identifier, FailureStage::SetState, &err);
                    self.fail(&mut result, batch_id, failure);
                    continue;
                }
            }

            result.record_success(address);
            self.publish(ProvisionEvent::DeviceCreated {
                batch_id,
                address,
                identifier,
            });
        }

        tracing::info!(
            %batch_id,
            succeeded = result.succeeded_addresses.len(),
            failed = result.failures.len(),
            "Finished batch"
        );
        self.publish(ProvisionEvent::Finished {
            batch_id,
            succeeded: result.succeeded_addresses.len(),
            failed: result.failures.len(),
        });

        Ok(result)
    }

    fn fail(&self, result: &mut BatchResult, batch_id: BatchId, failure: BatchFailure) {
        tracing::warn!(
            %batch_id,
            address = failure.address,
            identifier = %failure.identifier,
            stage = ?failure.stage,
            message = %failure.message,
            "Device failed"
        );
        self.publish(ProvisionEvent::DeviceFailed {
            batch_id,
            address: failure.address,
            stage: failure.stage,
            message: failure.message.clone(),
        });
        result.record_failure(failure);
    }

    fn publish(&self, event: ProvisionEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::{DeviceError, Error, ValueError};
    use crate::naming::{CollisionScope, NameSet};
    use crate::state::{DeviceFields, DeviceRecord};
    use crate::types::{DeviceKind, TargetState};

    #[derive(Debug, Default)]
    struct Recorder {
        created: Mutex<Vec<(String, Option<String>)>>,
        states: Mutex<Vec<(String, i32)>>,
    }

    impl DeviceRegistry for Recorder {
        async fn create_device(
            &self,
            kind: DeviceKind,
            identifier: &str,
            display_name: Option<&str>,
            _fields: &DeviceFields,
        ) -> std::result::Result<DeviceRecord, DeviceError> {
            self.created
                .lock()
                .unwrap()
                .push((identifier.to_string(), display_name.map(str::to_string)));
            Ok(DeviceRecord::new(kind, identifier))
        }

        async fn set_state(
            &self,
            _kind: DeviceKind,
            identifier: &str,
            raw_state: i32,
        ) -> std::result::Result<(), DeviceError> {
            self.states
                .lock()
                .unwrap()
                .push((identifier.to_string(), raw_state));
            Ok(())
        }
    }

    #[tokio::test]
    async fn names_are_unique_within_the_batch() {
        let provisioner = BatchProvisioner::new(Recorder::default());
        let request = BatchRequest::new(DeviceKind::Turnout, "IT", 10)
            .with_count(3)
            .with_display_name("Yard");

        let result = provisioner
            .provision(&request, &ProvisioningContext::default())
            .await
            .unwrap();

        assert_eq!(result.succeeded_addresses, vec![10, 11, 12]);
        let created = provisioner.registry().created.lock().unwrap().clone();
        let names: Vec<_> = created.iter().map(|(_, n)| n.clone().unwrap()).collect();
        assert_eq!(names, vec!["Yard", "Yard 2", "Yard 3"]);
    }

    #[tokio::test]
    async fn empty_display_name_falls_back_to_address() {
        let provisioner = BatchProvisioner::new(Recorder::default());
        let request = BatchRequest::new(DeviceKind::Light, "IL", 7).with_count(2);

        provisioner
            .provision(&request, &ProvisioningContext::default())
            .await
            .unwrap();

        let created = provisioner.registry().created.lock().unwrap().clone();
        assert_eq!(
            created,
            vec![
                ("IL7".to_string(), Some("7".to_string())),
                ("IL8".to_string(), Some("8".to_string())),
            ]
        );
    }

    #[tokio::test]
    async fn snapshot_names_are_skipped() {
        let provisioner = BatchProvisioner::new(Recorder::default());
        let existing: NameSet = ["yard", "Yard 2"].into_iter().collect();
        let request = BatchRequest::new(DeviceKind::Turnout, "IT", 1)
            .with_count(2)
            .with_display_name("Yard");

        provisioner
            .provision(&request, &ProvisioningContext::new(existing))
            .await
            .unwrap();

        let created = provisioner.registry().created.lock().unwrap().clone();
        assert_eq!(created[0].1.as_deref(), Some("Yard 3"));
        assert_eq!(created[1].1.as_deref(), Some("Yard 4"));
    }

    #[tokio::test]
    async fn inverted_turnouts_get_swapped_code() {
        let provisioner = BatchProvisioner::new(Recorder::default());
        let request = BatchRequest::new(DeviceKind::Turnout, "IT", 1)
            .with_state(TargetState::Secondary)
            .with_inverted(true);

        provisioner
            .provision(&request, &ProvisioningContext::default())
            .await
            .unwrap();

        let states = provisioner.registry().states.lock().unwrap().clone();
        assert_eq!(states, vec![("IT1".to_string(), 2)]);
    }

    #[tokio::test]
    async fn custom_naming_policy_is_used() {
        let provisioner = BatchProvisioner::new(Recorder::default())
            .with_naming_policy(NamingPolicy::ROSTER);
        let request = BatchRequest::new(DeviceKind::Turnout, "IT", 1)
            .with_count(2)
            .with_display_name("Lead");

        provisioner
            .provision(&request, &ProvisioningContext::default())
            .await
            .unwrap();

        let created = provisioner.registry().created.lock().unwrap().clone();
        assert_eq!(created[1].1.as_deref(), Some("Lead2"));
    }

    async fn display_names_for(policy: NamingPolicy) -> Vec<String> {
        let provisioner = BatchProvisioner::new(Recorder::default()).with_naming_policy(policy);
        let request = BatchRequest::new(DeviceKind::Turnout, "IT", 5)
            .with_count(2)
            .with_display_name("IT4");

        provisioner
            .provision(&request, &ProvisioningContext::default())
            .await
            .unwrap();

        let created = provisioner.registry().created.lock().unwrap().clone();
        created.into_iter().filter_map(|(_, name)| name).collect()
    }

    #[tokio::test]
    async fn batch_reservations_follow_collision_scope() {
        // IT5 is created first; whether it blocks the next name depends on scope.
        let names_only = NamingPolicy::TURNOUT.with_scope(CollisionScope::DisplayNames);
        assert_eq!(display_names_for(names_only).await, vec!["IT4", "IT5"]);
        assert_eq!(
            display_names_for(NamingPolicy::TURNOUT).await,
            vec!["IT4", "IT6"]
        );
    }

    #[tokio::test]
    async fn batch_reservations_match_snapshot_rule() {
        let provisioner = BatchProvisioner::new(Recorder::default());
        let request = BatchRequest::new(DeviceKind::Locomotive, "Mogul", 3)
            .with_count(2)
            .with_display_name("Mogul2");
        provisioner
            .provision(&request, &ProvisioningContext::default())
            .await
            .unwrap();
        let created = provisioner.registry().created.lock().unwrap().clone();

        // The same device, seen in a snapshot instead of created in the batch.
        let first = DeviceRecord::new(DeviceKind::Locomotive, "Mogul3").with_display_name("Mogul2");
        let snapshot = NameSet::from_records([&first], NamingPolicy::ROSTER.scope());
        let expected = NamingPolicy::ROSTER.suggest("Mogul2", &snapshot, false, String::new);

        assert_eq!(created[0].1.as_deref(), Some("Mogul2"));
        assert_eq!(created[1].1.as_deref(), Some(expected.as_str()));
        assert_eq!(expected, "Mogul4");
    }

    #[tokio::test]
    async fn validation_error_makes_no_calls() {
        let provisioner = BatchProvisioner::new(Recorder::default());
        let request = BatchRequest::new(DeviceKind::Turnout, "", 1).with_count(5);

        let err = provisioner
            .provision(&request, &ProvisioningContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Value(ValueError::MissingPrefix)));
        assert!(provisioner.registry().created.lock().unwrap().is_empty());
    }
}
