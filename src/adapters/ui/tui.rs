//! Implements InputPort. Inquire-based interactive wizard shell.
//!
//! Rendering only: step indicator, prompts, error display. All decisions
//! (validation, navigation, token handling) live in WizardService.

use crate::domain::{
    BusinessProfileUpdate, DomainError, GENERAL, ImageAttachment, Role, StepErrors, WizardStep,
};
use crate::ports::InputPort;
use crate::usecases::{StepOutcome, WizardService};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Confirm, Password, Select, Text};
use std::time::Duration;
use tokio::sync::Mutex;

/// Applies the wizard theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("»").with_fg(Color::LightRed))
        .with_answered_prompt_prefix(Styled::new("✓").with_fg(Color::LightGreen));
    inquire::set_global_render_config(config);
}

fn prompt_err(e: inquire::InquireError) -> DomainError {
    DomainError::Input(e.to_string())
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::default_spinner());
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn print_step_header(step: WizardStep) {
    println!();
    for s in [WizardStep::RoleAuth, WizardStep::Profile] {
        let marker = if s == step { "●" } else { "○" };
        print!("  {marker} Step {}: {}", s.number(), s.title());
    }
    println!("\n");
}

fn print_errors(errors: &StepErrors) {
    if let Some(general) = errors.get(GENERAL) {
        println!("  ! {general}");
    }
    for (field, message) in errors.iter().filter(|(field, _)| field.as_str() != GENERAL) {
        println!("  ! {field}: {message}");
    }
}

/// What the operator picked from the profile menu.
#[derive(Clone, Copy)]
enum ProfileAction {
    Edit(&'static str),
    AttachImage,
    Review,
    Submit,
    Back,
    Exit,
}

const PROFILE_MENU: [(&str, ProfileAction); 12] = [
    ("Identity (name, mobile, status, rating)", ProfileAction::Edit("identity")),
    ("Delivery charges", ProfileAction::Edit("delivery")),
    ("Payout details", ProfileAction::Edit("payout")),
    ("Address & location", ProfileAction::Edit("address")),
    ("Vendor login credentials", ProfileAction::Edit("credentials")),
    ("Categories & tags", ProfileAction::Edit("tags")),
    ("Flags (pure veg, popular)", ProfileAction::Edit("flags")),
    ("Attach restaurant image", ProfileAction::AttachImage),
    ("Review entered data", ProfileAction::Review),
    ("Submit registration", ProfileAction::Submit),
    ("Back to login step", ProfileAction::Back),
    ("Exit without submitting", ProfileAction::Exit),
];

/// TUI adapter. Owns the wizard service for the duration of the run.
pub struct WizardTui {
    wizard: Mutex<WizardService>,
}

impl WizardTui {
    pub fn new(wizard: WizardService) -> Self {
        Self {
            wizard: Mutex::new(wizard),
        }
    }

    /// Step 1: role selection and login. Returns false when the operator
    /// chose to exit.
    async fn auth_step(&self, wizard: &mut WizardService) -> Result<bool, DomainError> {
        if let Some(message) = wizard.login_error() {
            println!("  ! {message}");
        }
        if let Some(errors) = wizard.errors_for(WizardStep::RoleAuth) {
            print_errors(errors);
        }

        if wizard.is_authenticated() {
            let choice = Select::new("Already logged in.", vec!["Continue", "Exit"])
                .prompt()
                .map_err(prompt_err)?;
            if choice == "Exit" {
                return Ok(false);
            }
            wizard.next();
            return Ok(true);
        }

        let choice = Select::new("Log in as:", vec!["agent", "employee", "Exit"])
            .prompt()
            .map_err(prompt_err)?;
        let role = match choice {
            "agent" => Role::Agent,
            "employee" => Role::Employee,
            _ => return Ok(false),
        };
        wizard.select_role(role);

        let username = Text::new("Username:").prompt().map_err(prompt_err)?;
        let password = Password::new("Password:")
            .without_confirmation()
            .prompt()
            .map_err(prompt_err)?;

        let bar = spinner("Logging in...");
        let result = wizard.login(&username, &password).await;
        bar.finish_and_clear();

        match result {
            Ok(()) if wizard.is_authenticated() => println!("  Logged in as {role}."),
            Ok(()) => println!("  Login did not return a token; please try again."),
            Err(_) => {
                // Message was recorded; rendered at the top of the next pass.
            }
        }
        Ok(true)
    }

    async fn profile_step(&self, wizard: &mut WizardService) -> Result<ProfileAction, DomainError> {
        if let Some(errors) = wizard.errors_for(WizardStep::Profile) {
            print_errors(errors);
        }

        let labels: Vec<&str> = PROFILE_MENU.iter().map(|(label, _)| *label).collect();
        let choice = Select::new("Business profile:", labels)
            .prompt()
            .map_err(prompt_err)?;
        let action = PROFILE_MENU
            .iter()
            .find(|(label, _)| *label == choice)
            .map(|(_, action)| *action)
            .unwrap_or(ProfileAction::Exit);

        match action {
            ProfileAction::Edit(section) => {
                let update = self.edit_section(wizard, section)?;
                wizard.update_profile(update);
                Ok(ProfileAction::Edit(section))
            }
            ProfileAction::AttachImage => {
                self.attach_image(wizard).await?;
                Ok(ProfileAction::AttachImage)
            }
            ProfileAction::Review => {
                self.review(wizard);
                Ok(ProfileAction::Review)
            }
            ProfileAction::Submit => Ok(ProfileAction::Submit),
            ProfileAction::Back => Ok(ProfileAction::Back),
            ProfileAction::Exit => Ok(ProfileAction::Exit),
        }
    }

    fn edit_section(
        &self,
        wizard: &WizardService,
        section: &str,
    ) -> Result<BusinessProfileUpdate, DomainError> {
        let p = &wizard.record().profile;
        let text = |label: &str, current: &str| {
            Text::new(label)
                .with_initial_value(current)
                .prompt()
                .map_err(prompt_err)
        };
        let mut update = BusinessProfileUpdate::default();
        match section {
            "identity" => {
                update.name = Some(text("Restaurant name:", &p.name)?);
                update.mobile = Some(text("Mobile number:", &p.mobile)?);
                update.status = Some(text("Status:", &p.status)?);
                update.rating = Some(text("Rating:", &p.rating)?);
            }
            "delivery" => {
                update.charge_type = Some(text("Charge type (fixed/dynamic):", &p.charge_type)?);
                update.fixed_charge = Some(text("Fixed charge:", &p.fixed_charge)?);
                update.dynamic_charge = Some(text("Dynamic charge:", &p.dynamic_charge)?);
                update.store_charge = Some(text("Store charge:", &p.store_charge)?);
                update.delivery_radius = Some(text("Delivery radius (km):", &p.delivery_radius)?);
                update.minimum_order = Some(text("Minimum order:", &p.minimum_order)?);
                update.commission_rate = Some(text("Commission rate (%):", &p.commission_rate)?);
            }
            "payout" => {
                update.bank_name = Some(text("Bank name:", &p.bank_name)?);
                update.bank_code = Some(text("Bank code:", &p.bank_code)?);
                update.recipient_name = Some(text("Recipient name:", &p.recipient_name)?);
                update.account_number = Some(text("Account number:", &p.account_number)?);
                update.paypal_id = Some(text("PayPal id:", &p.paypal_id)?);
                update.upi_id = Some(text("UPI id:", &p.upi_id)?);
            }
            "address" => {
                update.address_search = Some(text("Address search text:", &p.address_search)?);
                update.full_address = Some(text("Full address:", &p.full_address)?);
                update.pincode = Some(text("Pincode:", &p.pincode)?);
                update.landmark = Some(text("Landmark:", &p.landmark)?);
                update.latitude = Some(text("Latitude:", &p.latitude)?);
                update.longitude = Some(text("Longitude:", &p.longitude)?);
                update.city = Some(text("City:", &p.city)?);
                update.state = Some(text("State:", &p.state)?);
                update.map_mode = Some(text("Map rendering mode:", &p.map_mode)?);
            }
            "credentials" => {
                update.email = Some(text("Vendor login email:", &p.email)?);
                update.password = Some(
                    Password::new("Vendor login password:")
                        .without_confirmation()
                        .prompt()
                        .map_err(prompt_err)?,
                );
            }
            "tags" => {
                let categories = text("Categories (comma-separated):", &p.categories.join(", "))?;
                let tags = text("Service tags (comma-separated):", &p.tags.join(", "))?;
                update.categories = Some(split_list(&categories));
                update.tags = Some(split_list(&tags));
            }
            "flags" => {
                update.pure_veg = Some(
                    Confirm::new("Pure vegetarian?")
                        .with_default(p.pure_veg)
                        .prompt()
                        .map_err(prompt_err)?,
                );
                update.popular = Some(
                    Confirm::new("Mark as popular?")
                        .with_default(p.popular)
                        .prompt()
                        .map_err(prompt_err)?,
                );
            }
            _ => {}
        }
        Ok(update)
    }

    async fn attach_image(&self, wizard: &mut WizardService) -> Result<(), DomainError> {
        let path = Text::new("Image file path:").prompt().map_err(prompt_err)?;
        if path.trim().is_empty() {
            return Ok(());
        }
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| DomainError::Input(format!("read image {path}: {e}")))?;
        let file_name = std::path::Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "restaurantImage".to_string());
        println!("  Attached {file_name} ({} bytes).", bytes.len());
        wizard.update_profile(BusinessProfileUpdate {
            image: Some(ImageAttachment { file_name, bytes }),
            ..Default::default()
        });
        Ok(())
    }

    fn review(&self, wizard: &WizardService) {
        let p = &wizard.record().profile;
        println!("  Restaurant: {} ({})", p.name, p.mobile);
        println!("  Address: {} [{}, {}]", p.full_address, p.latitude, p.longitude);
        println!("  Login email: {}", p.email);
        println!("  Categories: {:?}  Tags: {:?}", p.categories, p.tags);
        println!("  Pure veg: {}  Popular: {}", p.pure_veg, p.popular);
        println!(
            "  Image: {}",
            p.image
                .as_ref()
                .map(|i| i.file_name.as_str())
                .unwrap_or("none")
        );
    }
}

fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl InputPort for WizardTui {
    async fn run(&self) -> Result<(), DomainError> {
        let mut wizard = self.wizard.lock().await;
        loop {
            print_step_header(wizard.step());
            match wizard.step() {
                WizardStep::RoleAuth => {
                    if !self.auth_step(&mut wizard).await? {
                        return Ok(());
                    }
                }
                WizardStep::Profile => {
                    // Render guard: same predicate the validator uses.
                    if !wizard.is_authenticated() {
                        println!("  Authentication required before the profile step.");
                        wizard.previous();
                        continue;
                    }
                    match self.profile_step(&mut wizard).await? {
                        ProfileAction::Submit => {
                            let bar = spinner("Submitting registration...");
                            let result = wizard.submit().await;
                            bar.finish_and_clear();
                            match result {
                                Ok(StepOutcome::Advanced) => {
                                    println!("  Vendor registered successfully.");
                                    tokio::time::sleep(wizard.redirect_delay()).await;
                                    wizard.reset();
                                    return Ok(());
                                }
                                Ok(StepOutcome::Blocked) => {
                                    // Errors were stored; next pass renders them.
                                }
                                Err(e) => println!("  ! {}", e.message()),
                            }
                        }
                        ProfileAction::Back => wizard.previous(),
                        ProfileAction::Exit => return Ok(()),
                        _ => {}
                    }
                }
            }
        }
    }
}
