//! Command handling for the bloodbank CLI.
//!
//! `App` owns the loaded configuration, the admin session and the API client,
//! and runs one subcommand against them.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info, warn};

use bloodbank_core::config::ENV_PASSWORD;
use bloodbank_core::dashboard::{
    filter_donors, inventory_rows, or_empty, split_drives, usable_volume, DashboardSnapshot,
    DashboardView,
};
use bloodbank_core::inventory::UnitDraft;
use bloodbank_core::models::{
    Admin, Antigen, BloodGroup, Drive, NewAdmin, NewDonor, NewDrive, ProductType, Role,
};
use bloodbank_core::utils::{column, format_date, format_liters, format_optional};
use bloodbank_core::validation::{
    validate_new_admin, validate_new_donor, validate_new_drive, validate_registration,
};
use bloodbank_core::{ApiClient, Config, CredentialStore, Session};

use crate::Commands;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for admin name input.
const MAX_NAME_LENGTH: usize = 50;

/// Width of the name column in plain-text tables.
const NAME_COLUMN_WIDTH: usize = 24;

pub struct App {
    config: Config,
    session: Session,
    api: ApiClient,
}

impl App {
    /// Load config and any saved session. `api_url` overrides the configured store.
    pub fn new(api_url: Option<String>) -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let cache_dir = Config::cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));
        debug!(?cache_dir, "Cache directory configured");

        let mut session = Session::new(cache_dir);
        if let Err(e) = session.load() {
            warn!(error = %e, "Failed to load session");
        }

        let base_url = api_url.unwrap_or_else(|| config.api_base_url().to_string());
        debug!(%base_url, "Using record store");
        let api = ApiClient::new(base_url)?;

        Ok(Self { config, session, api })
    }

    pub async fn execute(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Login { name, remember } => self.login(name, remember).await,
            Commands::Logout { forget } => self.logout(forget),
            Commands::Whoami => self.whoami(),
            Commands::Register { name, role, campus, department } => {
                self.register(name, role, campus, department).await
            }
            Commands::Dashboard { json } => self.dashboard(json).await,
            Commands::Inventory { group } => self.inventory(group).await,
            Commands::Donors { search, group } => self.donors(search, group).await,
            Commands::Drives => self.drives().await,
            Commands::Admins => self.admins().await,
            Commands::AddUnit { donor, group, antigen, product, amount, donated, expiry } => {
                self.add_unit(donor, group, antigen, product, amount, donated, expiry).await
            }
            Commands::AddDonor {
                name,
                age,
                gender,
                department,
                branch,
                dob,
                group,
                antigen,
                product,
                contact,
                amount,
            } => {
                let donor = NewDonor {
                    name,
                    age,
                    gender,
                    department,
                    branch,
                    dob,
                    blood_group: group,
                    antigen,
                    product_type: product,
                    contact_number: contact,
                    amount_donated: amount,
                    recorded_by: None,
                };
                self.add_donor(donor).await
            }
            Commands::AddDrive { date, campus, venue, total } => {
                self.add_drive(date, campus, venue, total).await
            }
            Commands::AddAdmin { name, role, campus, department } => {
                self.add_admin(name, role, campus, department).await
            }
        }
    }

    // ===== Session =====

    fn require_login(&self) -> Result<&Admin> {
        match self.session.admin() {
            Some(admin) => Ok(admin),
            None => bail!("Not logged in. Run `bloodbank login` first."),
        }
    }

    fn require_admin(&self) -> Result<&Admin> {
        let admin = self.require_login()?;
        if !self.session.is_admin() {
            bail!("{} accounts cannot manage admins", admin.role);
        }
        Ok(admin)
    }

    async fn login(&mut self, name: Option<String>, remember: bool) -> Result<()> {
        let name = match name.or_else(|| self.config.last_username.clone()) {
            Some(name) => name,
            None => prompt_name()?,
        };
        if name.is_empty() {
            bail!("Admin name and password required");
        }

        let from_env = std::env::var(ENV_PASSWORD).ok().filter(|p| !p.is_empty());
        let password = match from_env {
            Some(password) => password,
            None => match CredentialStore::get_password(&name) {
                Ok(password) => {
                    debug!(name = %name, "Using stored password");
                    password
                }
                Err(_) => rpassword::prompt_password("Password: ")?,
            },
        };

        println!("Authenticating...");
        let admin = self.api.login(&name, &password).await?;

        if remember {
            if let Err(e) = CredentialStore::store(&name, &password) {
                warn!(error = %e, "Failed to store credentials");
            }
        }
        if let Err(e) = self.config.remember_username(&name) {
            warn!(error = %e, "Failed to save config");
        }

        println!("Logged in as {} ({})", admin.name, admin.role);
        self.session.update(admin);
        self.session.save()?;
        Ok(())
    }

    fn logout(&mut self, forget: bool) -> Result<()> {
        let name = self.session.admin().map(|a| a.name.clone());
        self.session.clear()?;

        if forget {
            if let Some(name) = name.as_deref().or(self.config.last_username.as_deref()) {
                if let Err(e) = CredentialStore::delete(name) {
                    warn!(error = %e, "Failed to delete stored credentials");
                }
            }
        }

        info!(admin = ?name, "Logged out");
        println!("Logged out.");
        Ok(())
    }

    fn whoami(&self) -> Result<()> {
        let admin = self.require_login()?;
        println!("{} (#{})", admin.name, admin.admin_id);
        println!("  Role:       {}", admin.role);
        println!("  Campus:     {}", format_optional(admin.campus.as_deref(), "-"));
        println!("  Department: {}", format_optional(admin.department.as_deref(), "-"));
        Ok(())
    }

    async fn register(
        &self,
        name: String,
        role: Role,
        campus: String,
        department: String,
    ) -> Result<()> {
        let password = rpassword::prompt_password("Password: ")?;
        let confirm = rpassword::prompt_password("Confirm password: ")?;
        validate_registration(&password, &confirm)?;

        let admin = NewAdmin { name, role, campus, department, password };
        validate_new_admin(&admin)?;
        self.api.register(&admin).await?;

        println!("Registration successful. Log in with `bloodbank login --name {}`.", admin.name);
        Ok(())
    }

    // ===== Views =====

    async fn dashboard(&self, json: bool) -> Result<()> {
        let admin = self.require_login()?;
        let snapshot = DashboardSnapshot::fetch(&self.api).await;
        let view = DashboardView::build(&snapshot, Utc::now());

        if json {
            let report = serde_json::json!({
                "stats": view.stats,
                "inventory_by_group": view.inventory_by_group,
                "low_stock": view.alerts.low_stock,
                "expiring_unit_ids": view.alerts.expiring.iter().map(|u| u.blood_id).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("=== Blood Bank Dashboard ({}) ===\n", admin.name);
        println!("Total donors:     {}", view.stats.total_donors);
        println!(
            "Blood volume:     {} in {} units",
            format_liters(view.stats.total_volume),
            view.stats.total_units
        );
        println!(
            "Drives:           {} ({} upcoming)",
            view.stats.total_drives, view.stats.upcoming_drives
        );

        if view.alerts.has_alerts() {
            println!("\nAlerts");
            if !view.alerts.low_stock.is_empty() {
                let groups: Vec<String> = view
                    .alerts
                    .low_stock
                    .iter()
                    .map(|s| format!("{} ({})", s.group, format_liters(s.amount)))
                    .collect();
                println!("  Low stock: {}", groups.join(", "));
            }
            if let Some(message) = view.alerts.expiring_message() {
                println!("  {}", message);
            }
        }

        println!("\nInventory by blood group");
        for summary in &view.inventory_by_group {
            println!(
                "  {} {:>10}  {} units",
                column(summary.group.as_str(), 4),
                format_liters(summary.amount),
                summary.units
            );
        }

        println!("\nRecent donors");
        if view.recent_donors.is_empty() {
            println!("  (none)");
        }
        for donor in &view.recent_donors {
            println!("  {}", donor.display_label());
        }

        println!("\nUpcoming drives");
        if view.upcoming_drives.is_empty() {
            println!("  (none)");
        }
        for drive in &view.upcoming_drives {
            print_drive(drive);
        }
        Ok(())
    }

    async fn inventory(&self, group: Option<BloodGroup>) -> Result<()> {
        self.require_login()?;
        let units = or_empty("blood units", self.api.list_units().await);
        let rows = inventory_rows(&units, group, Utc::now());

        if rows.is_empty() {
            println!("No blood units found.");
            return Ok(());
        }
        println!(
            "{:<6} {:<6} {:<4} {:<16} {:>8}  {:<12}  {:<12}  Status",
            "ID", "Donor", "Grp", "Type", "Amount", "Donated", "Expiry"
        );
        for row in &rows {
            let unit = row.unit;
            let donor = unit.donor_id.map(|id| format!("#{}", id)).unwrap_or_else(|| "-".to_string());
            // Mark expiries set by hand at intake
            let expiry_mark = if unit.has_default_expiry() { ' ' } else { '*' };
            println!(
                "{:<6} {:<6} {:<4} {} {:>8}  {:<12}  {:<11}{}  {}",
                format!("#{}", unit.blood_id),
                donor,
                unit.blood_group,
                column(unit.product_type.label(), 16),
                format_liters(unit.amount),
                format_date(unit.donation_date),
                format_date(unit.expiry_date),
                expiry_mark,
                row.freshness
            );
        }
        println!(
            "\n{} units, {} usable",
            rows.len(),
            format_liters(usable_volume(&rows))
        );
        Ok(())
    }

    async fn donors(&self, search: Option<String>, group: Option<BloodGroup>) -> Result<()> {
        self.require_login()?;
        let donors = or_empty("donors", self.api.list_donors().await);
        let matches = filter_donors(&donors, search.as_deref().unwrap_or(""), group);

        if matches.is_empty() {
            println!("No donors found.");
            return Ok(());
        }
        for donor in matches {
            println!(
                "{:<6} {} {:<4} {:<12} {:<14} {:>8}",
                format!("#{}", donor.donor_id),
                column(&donor.name, NAME_COLUMN_WIDTH),
                donor.blood_group,
                format_optional(donor.department.as_deref(), "-"),
                format_optional(donor.contact_number.as_deref(), "-"),
                format_liters(donor.amount_donated)
            );
        }
        Ok(())
    }

    async fn drives(&self) -> Result<()> {
        self.require_login()?;
        let drives = or_empty("drives", self.api.list_drives().await);
        let (upcoming, past) = split_drives(&drives, Utc::now().date_naive());

        println!("Upcoming drives");
        if upcoming.is_empty() {
            println!("  (none)");
        }
        upcoming.into_iter().for_each(print_drive);

        println!("\nPast drives");
        if past.is_empty() {
            println!("  (none)");
        }
        past.into_iter().for_each(print_drive);
        Ok(())
    }

    async fn admins(&self) -> Result<()> {
        self.require_admin()?;
        let admins = or_empty("admins", self.api.list_admins().await);
        if admins.is_empty() {
            println!("No admins found.");
        }
        for admin in &admins {
            println!(
                "{:<6} {} {:<12} {:<12} {}",
                format!("#{}", admin.admin_id),
                column(&admin.name, NAME_COLUMN_WIDTH),
                admin.role,
                format_optional(admin.campus.as_deref(), "-"),
                format_optional(admin.department.as_deref(), "-")
            );
        }
        Ok(())
    }

    // ===== Create =====

    #[allow(clippy::too_many_arguments)]
    async fn add_unit(
        &self,
        donor_id: Option<i64>,
        group: Option<BloodGroup>,
        antigen: Option<Antigen>,
        product: Option<ProductType>,
        amount: f64,
        donated: Option<NaiveDate>,
        expiry: Option<NaiveDate>,
    ) -> Result<()> {
        self.require_login()?;
        let today = Local::now().date_naive();
        let mut draft = UnitDraft::new();

        if let Some(id) = donor_id {
            let donor = self.api.get_donor(id).await?;
            println!("Donor: {}", donor.display_label());
            draft.select_donor(Some(&donor));
        }
        draft.set_donation_date(donated.unwrap_or(today));
        if let Some(group) = group {
            draft.blood_group = group;
        }
        if let Some(antigen) = antigen {
            draft.antigen = antigen;
        }
        if let Some(product) = product {
            draft.set_product_type(product);
        }
        if let Some(expiry) = expiry {
            draft.set_expiry_date(expiry);
        }
        draft.amount = Some(amount);

        let unit = draft.submit(today)?;
        self.api.create_unit(&unit).await?;
        println!(
            "Recorded {} {} ({}), expires {}",
            format_liters(unit.amount),
            unit.product_type,
            unit.blood_group,
            format_date(unit.expiry_date)
        );
        Ok(())
    }

    async fn add_donor(&self, mut donor: NewDonor) -> Result<()> {
        let admin = self.require_login()?;
        donor.recorded_by = Some(admin.admin_id);
        validate_new_donor(&donor, Local::now().date_naive())?;

        self.api.create_donor(&donor).await?;
        println!("Added donor {} ({})", donor.name, donor.blood_group);
        Ok(())
    }

    async fn add_drive(
        &self,
        drive_date: NaiveDate,
        campus: String,
        venue: String,
        total_amount: Option<f64>,
    ) -> Result<()> {
        let admin = self.require_login()?;
        let drive = NewDrive {
            admin_id: Some(admin.admin_id),
            drive_date,
            campus,
            venue,
            total_amount,
        };
        validate_new_drive(&drive, Local::now().date_naive())?;

        self.api.create_drive(&drive).await?;
        println!("Scheduled drive on {} at {}", format_date(drive.drive_date), drive.venue);
        Ok(())
    }

    async fn add_admin(
        &self,
        name: String,
        role: Role,
        campus: String,
        department: String,
    ) -> Result<()> {
        self.require_admin()?;
        let password = rpassword::prompt_password(format!("Password for {}: ", name))?;
        let admin = NewAdmin { name, role, campus, department, password };
        validate_new_admin(&admin)?;

        self.api.create_admin(&admin).await?;
        println!("Added {} {}", admin.role, admin.name);
        Ok(())
    }
}

fn print_drive(drive: &Drive) {
    let total = drive
        .total_amount
        .map(|t| format!("  {}", format_liters(t)))
        .unwrap_or_default();
    println!(
        "  {}  {} / {}{}",
        format_date(drive.drive_date),
        drive.campus,
        drive.venue,
        total
    );
}

fn prompt_name() -> Result<String> {
    print!("Admin name: ");
    io::stdout().flush()?;

    let mut name = String::new();
    io::stdin().read_line(&mut name)?;
    Ok(name.trim().chars().take(MAX_NAME_LENGTH).collect())
}
