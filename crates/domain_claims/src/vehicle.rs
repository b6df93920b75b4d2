//! Insured vehicle

use serde::{Deserialize, Serialize};

use core_kernel::VehicleId;
use crate::entity::{Deduplicated, Entity, NoFilter};

/// A vehicle, shared by every case with the same make, model and year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

/// Field set for creating a vehicle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

/// Partial update for a vehicle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiclePatch {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

/// Make, model and year
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleKey {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

impl Entity for Vehicle {
    type Id = VehicleId;
    type Fields = NewVehicle;
    type Patch = VehiclePatch;
    type Filter = NoFilter;

    const NAME: &'static str = "Vehicle";

    fn id(&self) -> VehicleId {
        self.id
    }

    fn from_fields(id: VehicleId, fields: NewVehicle) -> Self {
        Self {
            id,
            make: fields.make,
            model: fields.model,
            year: fields.year,
        }
    }

    fn apply_patch(&mut self, patch: VehiclePatch) {
        if let Some(make) = patch.make {
            self.make = Some(make);
        }
        if let Some(model) = patch.model {
            self.model = Some(model);
        }
        if let Some(year) = patch.year {
            self.year = Some(year);
        }
    }

    fn matches(&self, _filter: &NoFilter) -> bool {
        true
    }
}

impl Deduplicated for Vehicle {
    type Key = VehicleKey;

    fn key(&self) -> VehicleKey {
        VehicleKey {
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
        }
    }

    fn key_of(fields: &NewVehicle) -> VehicleKey {
        VehicleKey {
            make: fields.make.clone(),
            model: fields.model.clone(),
            year: fields.year,
        }
    }
}
