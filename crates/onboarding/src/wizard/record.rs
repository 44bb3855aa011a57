use serde::{Deserialize, Serialize};

/// Personal details collected on the first step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub profile_picture: Option<ProfilePicture>,
}

/// Reference to an uploaded profile image; the bytes themselves stay with the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePicture {
    pub file_name: String,
    pub mime: ImageMime,
    pub byte_size: u64,
}

/// Accepted profile picture content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMime {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl ImageMime {
    pub const fn essence(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// Position and department details collected on the second step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    pub department: String,
    pub position: String,
    pub start_date: String,
    pub job_type: JobType,
    pub salary: String,
    pub manager: String,
}

impl Default for JobDetails {
    fn default() -> Self {
        Self {
            department: String::new(),
            position: String::new(),
            start_date: String::new(),
            job_type: JobType::FullTime,
            salary: String::new(),
            manager: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
}

impl JobType {
    pub const fn ordered() -> [Self; 3] {
        [Self::FullTime, Self::PartTime, Self::Contract]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
        }
    }
}

/// A single declared skill with its experience statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub skill: String,
    pub experience: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: "09:00".to_string(),
            end: "17:00".to_string(),
        }
    }
}

/// Skills and work preferences collected on the third step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsPreferences {
    pub skills: Vec<SkillEntry>,
    pub working_hours: WorkingHours,
    pub remote_preference: u8,
    pub manager_approved: bool,
    pub notes: String,
}

impl Default for SkillsPreferences {
    fn default() -> Self {
        Self {
            skills: Vec::new(),
            working_hours: WorkingHours::default(),
            remote_preference: 0,
            manager_approved: false,
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

/// Guardian details, mandatory only while the applicant is under the guardian threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardianContact {
    pub name: String,
    pub phone: String,
}

/// The aggregate form record mutated throughout the wizard.
///
/// Exclusively owned by the state machine; every other component works on
/// immutable snapshots. The serde shape doubles as the draft format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub personal: PersonalInfo,
    pub job: JobDetails,
    pub skills: SkillsPreferences,
    pub emergency_contact: EmergencyContact,
    pub guardian_contact: Option<GuardianContact>,
    pub confirmed: bool,
}

/// One position in the linear wizard sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalInfo,
    JobDetails,
    SkillsPreferences,
    EmergencyContact,
    ReviewSubmit,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::PersonalInfo,
            Self::JobDetails,
            Self::SkillsPreferences,
            Self::EmergencyContact,
            Self::ReviewSubmit,
        ]
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::JobDetails => 2,
            Self::SkillsPreferences => 3,
            Self::EmergencyContact => 4,
            Self::ReviewSubmit => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Info",
            Self::JobDetails => "Job Details",
            Self::SkillsPreferences => "Skills & Preferences",
            Self::EmergencyContact => "Emergency Contact",
            Self::ReviewSubmit => "Review & Submit",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Basic personal information",
            Self::JobDetails => "Position and department details",
            Self::SkillsPreferences => "Skills and work preferences",
            Self::EmergencyContact => "Emergency contact information",
            Self::ReviewSubmit => "Review and confirm details",
        }
    }

    /// The following step, saturating at the review step.
    pub const fn next(self) -> Self {
        match self {
            Self::PersonalInfo => Self::JobDetails,
            Self::JobDetails => Self::SkillsPreferences,
            Self::SkillsPreferences => Self::EmergencyContact,
            Self::EmergencyContact => Self::ReviewSubmit,
            Self::ReviewSubmit => Self::ReviewSubmit,
        }
    }

    /// The preceding step, saturating at the first step.
    pub const fn back(self) -> Self {
        match self {
            Self::PersonalInfo => Self::PersonalInfo,
            Self::JobDetails => Self::PersonalInfo,
            Self::SkillsPreferences => Self::JobDetails,
            Self::EmergencyContact => Self::SkillsPreferences,
            Self::ReviewSubmit => Self::EmergencyContact,
        }
    }
}
