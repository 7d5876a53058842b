//! Domain entities. Pure data structures for the registration wizard.
//!
//! No HTTP/IO types here — adapters map to and from these.

/// Role the operator logs in as. Selects the auth endpoint and the
/// durable-storage key the issued token lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Agent,
    Employee,
}

impl Role {
    /// Path segment in the login URL (`/api/users/<segment>/login`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            Role::Agent => "agent",
            Role::Employee => "employee",
        }
    }

    /// Durable-storage key for this role's bearer token.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Role::Agent => "agentToken",
            Role::Employee => "employeeToken",
        }
    }

    pub fn other(&self) -> Role {
        match self {
            Role::Agent => Role::Employee,
            Role::Employee => Role::Agent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.path_segment()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated session. Created on successful login, never refreshed;
/// the token is read back from storage only at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub role: Role,
    pub token: String,
}

/// Binary image attached by the operator. Absent until a file is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The vendor's business profile: step-2 form data. Every field is a string,
/// a bool, or a string list, except the optional binary image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessProfile {
    // Identity
    pub name: String,
    pub mobile: String,
    pub status: String,
    pub rating: String,
    pub image: Option<ImageAttachment>,

    // Delivery economics
    pub charge_type: String,
    pub fixed_charge: String,
    pub dynamic_charge: String,
    pub store_charge: String,
    pub delivery_radius: String,
    pub minimum_order: String,
    pub commission_rate: String,

    // Payout
    pub bank_name: String,
    pub bank_code: String,
    pub recipient_name: String,
    pub account_number: String,
    pub paypal_id: String,
    pub upi_id: String,

    // Address
    pub address_search: String,
    pub full_address: String,
    pub pincode: String,
    pub landmark: String,
    pub latitude: String,
    pub longitude: String,
    pub city: String,
    pub state: String,
    pub map_mode: String,

    // Login credentials for the vendor account being created
    pub email: String,
    pub password: String,

    // Tags & flags
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub pure_veg: bool,
    pub popular: bool,
}

/// Partial profile edit. `Some` fields overwrite, `None` fields are left
/// untouched by the merge.
#[derive(Debug, Clone, Default)]
pub struct BusinessProfileUpdate {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub status: Option<String>,
    pub rating: Option<String>,
    pub image: Option<ImageAttachment>,
    pub charge_type: Option<String>,
    pub fixed_charge: Option<String>,
    pub dynamic_charge: Option<String>,
    pub store_charge: Option<String>,
    pub delivery_radius: Option<String>,
    pub minimum_order: Option<String>,
    pub commission_rate: Option<String>,
    pub bank_name: Option<String>,
    pub bank_code: Option<String>,
    pub recipient_name: Option<String>,
    pub account_number: Option<String>,
    pub paypal_id: Option<String>,
    pub upi_id: Option<String>,
    pub address_search: Option<String>,
    pub full_address: Option<String>,
    pub pincode: Option<String>,
    pub landmark: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub map_mode: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub pure_veg: Option<bool>,
    pub popular: Option<bool>,
}

impl BusinessProfile {
    /// Merge a partial update into this profile. Pure merge: no validation,
    /// untouched fields keep their values.
    pub fn apply(&mut self, update: BusinessProfileUpdate) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = update.$field { self.$field = v; })*
            };
        }
        merge!(
            name, mobile, status, rating, charge_type, fixed_charge,
            dynamic_charge, store_charge, delivery_radius, minimum_order,
            commission_rate, bank_name, bank_code, recipient_name, account_number,
            paypal_id, upi_id, address_search, full_address, pincode, landmark,
            latitude, longitude, city, state, map_mode, email, password, categories,
            tags, pure_veg, popular,
        );
        if let Some(img) = update.image {
            self.image = Some(img);
        }
    }
}

/// The whole wizard record: role selection (step 1) plus profile (step 2).
/// Created with defaults at wizard start, discarded on successful submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationRecord {
    pub role: Role,
    pub profile: BusinessProfile,
}
