// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::book::{AgeRestriction, VolumeSize};
use crate::entity::Entity;
use crate::UserId;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct User {
    pub id: UserId,
    pub name: String,

    // Stored profile facets consulted by the user-interest flow.
    pub preferred_volume: Option<VolumeSize>,
    pub preferred_age: Option<AgeRestriction>,
}

impl Entity for User {
    type Id = UserId;

    fn get_id(&self) -> Self::Id {
        self.id.clone()
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("name".into(), self.name.clone());

        if let Some(volume) = &self.preferred_volume {
            map.insert("preferred volume".into(), volume.to_string());
        }

        if let Some(age) = &self.preferred_age {
            map.insert("preferred age".into(), age.to_string());
        }

        map
    }
}
