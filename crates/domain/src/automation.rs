//! Automation: a configured CRM rule with a trigger type and a status.
//!
//! Automations are definitions only. Nothing in this system schedules or
//! executes them; executions are recorded separately as
//! [`AutomationRun`](crate::run::AutomationRun)s.

use serde::{Deserialize, Serialize};

use crate::error::{CrmError, ValidationError};
use crate::record::{Record, RecordKind};

/// Whether an automation is switched on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomationStatus {
    #[default]
    Active,
    Paused,
}

impl AutomationStatus {
    /// Wire representation, as stored in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
        }
    }
}

/// How an automation is meant to be triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Time based; see [`Automation::frequency`].
    #[default]
    Schedule,
    Webhook,
    Event,
}

/// A configured CRM automation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automation {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: AutomationStatus,
    #[serde(default)]
    pub trigger: Trigger,
    /// Free text such as `hourly` or `daily 9am`; only meaningful for
    /// [`Trigger::Schedule`].
    #[serde(default)]
    pub frequency: Option<String>,
}

impl Record for Automation {
    const KIND: RecordKind = RecordKind::Automation;
}

impl Automation {
    /// Create a builder for constructing an [`Automation`].
    #[must_use]
    pub fn builder() -> AutomationBuilder {
        AutomationBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::Validation`] with [`ValidationError::EmptyName`]
    /// when `name` is empty or only whitespace.
    pub fn validate(&self) -> Result<(), CrmError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Automation`].
#[derive(Debug, Default)]
pub struct AutomationBuilder {
    name: Option<String>,
    description: Option<String>,
    status: Option<AutomationStatus>,
    trigger: Option<Trigger>,
    frequency: Option<String>,
}

impl AutomationBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: AutomationStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    /// Consume the builder, validate, and return an [`Automation`].
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::Validation`] if the name is missing or empty.
    pub fn build(self) -> Result<Automation, CrmError> {
        let automation = Automation {
            name: self.name.unwrap_or_default(),
            description: self.description,
            status: self.status.unwrap_or_default(),
            trigger: self.trigger.unwrap_or_default(),
            frequency: self.frequency,
        };
        automation.validate()?;
        Ok(automation)
    }
}
