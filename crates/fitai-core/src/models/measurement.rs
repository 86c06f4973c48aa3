// ABOUTME: Body circumference measurement models for the 4-week biometric cycle
// ABOUTME: MeasurementSite, MeasurementSet, and BodyMeasurement with field-level validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// A tracked circumference site
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementSite {
    /// Waist
    Waist,
    /// Chest
    Chest,
    /// Hips
    Hips,
    /// Left upper arm
    LeftArm,
    /// Right upper arm
    RightArm,
    /// Left thigh
    LeftThigh,
    /// Right thigh
    RightThigh,
}

impl MeasurementSite {
    /// All tracked sites, in reporting order
    pub const ALL: [Self; 7] = [
        Self::Waist,
        Self::Chest,
        Self::Hips,
        Self::LeftArm,
        Self::RightArm,
        Self::LeftThigh,
        Self::RightThigh,
    ];

    /// Document field name for this site
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Waist => "waist_cm",
            Self::Chest => "chest_cm",
            Self::Hips => "hips_cm",
            Self::LeftArm => "left_arm_cm",
            Self::RightArm => "right_arm_cm",
            Self::LeftThigh => "left_thigh_cm",
            Self::RightThigh => "right_thigh_cm",
        }
    }
}

impl fmt::Display for MeasurementSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Waist => "Waist",
            Self::Chest => "Chest",
            Self::Hips => "Hips",
            Self::LeftArm => "Left arm",
            Self::RightArm => "Right arm",
            Self::LeftThigh => "Left thigh",
            Self::RightThigh => "Right thigh",
        };
        f.write_str(label)
    }
}

/// Circumference measurements in centimeters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MeasurementSet {
    /// Waist circumference
    #[serde(default)]
    pub waist_cm: Option<f64>,
    /// Chest circumference
    #[serde(default)]
    pub chest_cm: Option<f64>,
    /// Hip circumference
    #[serde(default)]
    pub hips_cm: Option<f64>,
    /// Left arm circumference
    #[serde(default)]
    pub left_arm_cm: Option<f64>,
    /// Right arm circumference
    #[serde(default)]
    pub right_arm_cm: Option<f64>,
    /// Left thigh circumference
    #[serde(default)]
    pub left_thigh_cm: Option<f64>,
    /// Right thigh circumference
    #[serde(default)]
    pub right_thigh_cm: Option<f64>,
}

impl MeasurementSet {
    /// Value recorded for a site
    #[must_use]
    pub const fn get(&self, site: MeasurementSite) -> Option<f64> {
        match site {
            MeasurementSite::Waist => self.waist_cm,
            MeasurementSite::Chest => self.chest_cm,
            MeasurementSite::Hips => self.hips_cm,
            MeasurementSite::LeftArm => self.left_arm_cm,
            MeasurementSite::RightArm => self.right_arm_cm,
            MeasurementSite::LeftThigh => self.left_thigh_cm,
            MeasurementSite::RightThigh => self.right_thigh_cm,
        }
    }

    /// Value for a site, or a field-level validation error when absent
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` naming the site's field
    pub fn require(&self, site: MeasurementSite) -> AppResult<f64> {
        self.get(site)
            .ok_or_else(|| AppError::missing_field(site.field_name()))
    }

    /// Validate a full baseline: all seven sites present and positive
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field
    pub fn validate_complete(&self) -> AppResult<()> {
        for site in MeasurementSite::ALL {
            let value = self.require(site)?;
            Self::check_positive(site, value)?;
        }
        Ok(())
    }

    /// Validate a follow-up record: at least one site, every present site positive
    ///
    /// # Errors
    ///
    /// Returns a validation error when empty or when a value is not positive
    pub fn validate_partial(&self) -> AppResult<()> {
        let mut any = false;
        for site in MeasurementSite::ALL {
            if let Some(value) = self.get(site) {
                Self::check_positive(site, value)?;
                any = true;
            }
        }
        if any {
            Ok(())
        } else {
            Err(AppError::invalid_input(
                "At least one body measurement is required",
            ))
        }
    }

    fn check_positive(site: MeasurementSite, value: f64) -> AppResult<()> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(AppError::out_of_range(
                site.field_name(),
                format!("{site} measurement must be positive"),
            ))
        }
    }

    /// Mean of left and right arm, when both are present
    #[must_use]
    pub fn average_arm(&self) -> Option<f64> {
        Some((self.left_arm_cm? + self.right_arm_cm?) / 2.0)
    }

    /// Mean of left and right thigh, when both are present
    #[must_use]
    pub fn average_thigh(&self) -> Option<f64> {
        Some((self.left_thigh_cm? + self.right_thigh_cm?) / 2.0)
    }
}

/// Timestamped measurement snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyMeasurement {
    /// Owning user
    pub user_id: Uuid,
    /// When the snapshot was taken
    pub date: DateTime<Utc>,
    /// Measured values
    pub measurements: MeasurementSet,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
}
