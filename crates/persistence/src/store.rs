// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine store traits over the `SQLite` adapter.

use parkstack::{
    ClaimOutcome, InventoryInsert, PartyDirectory, ReleaseOutcome, RequestStore, SlotStore,
    StoreError, StructureRepository, TransitionOutcome,
};
use parkstack_domain::{
    Car, CarId, Customer, CustomerId, Geometry, MotionProfile, NewSlot, Operator, OperatorId,
    ParkingRequest, Project, ProjectId, RequestId, RequestStatus, Scope, Slot, SlotId, Structure,
    StructureId, User, UserId,
};

use crate::Persistence;
use crate::{mutations, queries};

impl StructureRepository for Persistence {
    fn project_by_id(&mut self, project_id: ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(queries::structures::get_project(&mut self.conn, project_id)?)
    }

    fn structure_by_id(
        &mut self,
        structure_id: StructureId,
    ) -> Result<Option<Structure>, StoreError> {
        Ok(queries::structures::get_structure(
            &mut self.conn,
            structure_id,
        )?)
    }

    fn insert_structure(
        &mut self,
        project_id: ProjectId,
        name: &str,
        geometry: &Geometry,
        motion: &MotionProfile,
    ) -> Result<Structure, StoreError> {
        Ok(mutations::structures::insert_structure(
            &mut self.conn,
            project_id,
            name,
            geometry,
            motion,
        )?)
    }
}

impl SlotStore for Persistence {
    fn insert_inventory(
        &mut self,
        structure_id: StructureId,
        total_slots: u32,
        slots: &[NewSlot],
    ) -> Result<InventoryInsert, StoreError> {
        Ok(mutations::structures::insert_inventory(
            &mut self.conn,
            structure_id,
            total_slots,
            slots,
        )?)
    }

    fn slot_by_id(&mut self, slot_id: SlotId) -> Result<Option<Slot>, StoreError> {
        Ok(queries::slots::get_slot(&mut self.conn, slot_id)?)
    }

    fn list_by_structure(&mut self, structure_id: StructureId) -> Result<Vec<Slot>, StoreError> {
        Ok(queries::slots::list_slots_for_structure(
            &mut self.conn,
            structure_id,
        )?)
    }

    fn assigned_slot_for_car(&mut self, car_id: CarId) -> Result<Option<Slot>, StoreError> {
        Ok(queries::slots::assigned_slot_for_car(&mut self.conn, car_id)?)
    }

    fn claim(&mut self, slot_id: SlotId, car_id: CarId) -> Result<ClaimOutcome, StoreError> {
        Ok(mutations::slots::claim_slot(&mut self.conn, slot_id, car_id)?)
    }

    fn release(&mut self, slot_id: SlotId) -> Result<ReleaseOutcome, StoreError> {
        Ok(mutations::slots::release_slot(&mut self.conn, slot_id)?)
    }
}

impl PartyDirectory for Persistence {
    fn user_by_id(&mut self, user_id: UserId) -> Result<Option<User>, StoreError> {
        Ok(queries::parties::get_user(&mut self.conn, user_id)?)
    }

    fn car_by_id(&mut self, car_id: CarId) -> Result<Option<Car>, StoreError> {
        Ok(queries::parties::get_car(&mut self.conn, car_id)?)
    }

    fn earliest_car_for_user(&mut self, user_id: UserId) -> Result<Option<Car>, StoreError> {
        Ok(queries::parties::earliest_car_for_user(
            &mut self.conn,
            user_id,
        )?)
    }

    fn customer_by_id(
        &mut self,
        customer_id: CustomerId,
    ) -> Result<Option<Customer>, StoreError> {
        Ok(queries::parties::get_customer(&mut self.conn, customer_id)?)
    }

    fn customer_by_user(&mut self, user_id: UserId) -> Result<Option<Customer>, StoreError> {
        Ok(queries::parties::get_customer_by_user(
            &mut self.conn,
            user_id,
        )?)
    }

    fn operator_by_user(&mut self, user_id: UserId) -> Result<Option<Operator>, StoreError> {
        Ok(queries::parties::get_operator_by_user(
            &mut self.conn,
            user_id,
        )?)
    }

    fn approved_operator_for_scope(
        &mut self,
        scope: Scope,
    ) -> Result<Option<Operator>, StoreError> {
        Ok(queries::parties::approved_operator_for_scope(
            &mut self.conn,
            scope,
        )?)
    }
}

impl RequestStore for Persistence {
    fn insert_request(
        &mut self,
        user_id: UserId,
        operator_id: OperatorId,
        car_id: CarId,
    ) -> Result<ParkingRequest, StoreError> {
        Ok(mutations::requests::insert_request(
            &mut self.conn,
            user_id,
            operator_id,
            car_id,
        )?)
    }

    fn requests_for_operator(
        &mut self,
        operator_id: OperatorId,
    ) -> Result<Vec<ParkingRequest>, StoreError> {
        Ok(queries::requests::list_requests_for_operator(
            &mut self.conn,
            operator_id,
        )?)
    }

    fn requests_for_user(&mut self, user_id: UserId) -> Result<Vec<ParkingRequest>, StoreError> {
        Ok(queries::requests::list_requests_for_user(
            &mut self.conn,
            user_id,
        )?)
    }

    fn transition_request(
        &mut self,
        request_id: RequestId,
        operator_id: OperatorId,
        allowed_from: &[RequestStatus],
        to: RequestStatus,
    ) -> Result<TransitionOutcome, StoreError> {
        Ok(mutations::requests::transition_request(
            &mut self.conn,
            request_id,
            operator_id,
            allowed_from,
            to,
        )?)
    }
}
