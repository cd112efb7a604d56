// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line surface.

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use petsafe_model::{DeviceRequest, GeofenceRequest, Patch, PetRequest, ProfileUpdate};

/// PetSafe - track your pets from the command line.
#[derive(Parser, Debug)]
#[command(name = "petsafe", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and keep the credential on this device.
    Login {
        /// Account e-mail.
        #[arg(long)]
        email: String,
    },
    /// Create an account. Does not sign in.
    Register(RegisterArgs),
    /// Forget the stored credential.
    Logout,
    /// Show who is signed in, without contacting the server.
    Whoami,
    /// Show or change the profile.
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Manage pets.
    #[command(subcommand)]
    Pets(PetCommand),
    /// Manage tracker devices.
    #[command(subcommand)]
    Devices(DeviceCommand),
    /// Manage the safe zone.
    #[command(subcommand)]
    Geofence(GeofenceCommand),
    /// Read alerts.
    #[command(subcommand)]
    Alerts(AlertCommand),
    /// Register a push-notification token for this account.
    PushToken {
        token: String,
    },
    /// Serve the browser front end.
    Web,
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Fetch the profile and refresh the cached copy.
    Show,
    /// Change name or phone. Omitted options stay unchanged.
    Update(ProfileArgs),
    /// Change the password (prompts for both).
    Password,
}

#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    #[arg(long, conflicts_with = "clear_full_name")]
    pub full_name: Option<String>,
    #[arg(long)]
    pub clear_full_name: bool,
    #[arg(long, conflicts_with = "clear_phone")]
    pub phone: Option<String>,
    #[arg(long)]
    pub clear_phone: bool,
}

impl ProfileArgs {
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            full_name: text_patch(self.full_name.as_deref(), self.clear_full_name),
            phone: text_patch(self.phone.as_deref(), self.clear_phone),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum PetCommand {
    List,
    Show { id: u64 },
    Add(PetArgs),
    Update {
        id: u64,
        #[command(flatten)]
        changes: PetArgs,
    },
    Remove { id: u64 },
}

#[derive(Args, Debug, Default)]
pub struct PetArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub species: Option<String>,
    #[arg(long)]
    pub breed: Option<String>,
    #[arg(long)]
    pub microchip_id: Option<String>,
    /// Date of birth, `YYYY-MM-DD`.
    #[arg(long, value_parser = parse_date)]
    pub dob: Option<DateTime<Utc>>,
}

impl PetArgs {
    pub fn to_request(&self) -> PetRequest {
        PetRequest {
            name: non_blank(self.name.as_deref()),
            species: non_blank(self.species.as_deref()),
            breed: non_blank(self.breed.as_deref()),
            microchip_id: non_blank(self.microchip_id.as_deref()),
            dob: self.dob,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum DeviceCommand {
    List,
    /// Device details with its live status (battery, last position).
    Status { id: u64 },
    /// Recent position reports, newest first.
    Locations {
        id: u64,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    Add(DeviceArgs),
    Update {
        id: u64,
        #[command(flatten)]
        changes: DeviceArgs,
    },
    Remove { id: u64 },
}

#[derive(Args, Debug, Default)]
pub struct DeviceArgs {
    #[arg(long)]
    pub serial_number: Option<String>,
    #[arg(long)]
    pub imei: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub firmware: Option<String>,
    /// Link the device to a pet.
    #[arg(long)]
    pub pet: Option<u64>,
    #[arg(long)]
    pub connectivity: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

impl DeviceArgs {
    pub fn to_request(&self) -> DeviceRequest {
        DeviceRequest {
            serial_number: non_blank(self.serial_number.as_deref()),
            imei: non_blank(self.imei.as_deref()),
            model: non_blank(self.model.as_deref()),
            firmware: non_blank(self.firmware.as_deref()),
            pet_id: self.pet,
            connectivity: non_blank(self.connectivity.as_deref()),
            active: self.active,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum GeofenceCommand {
    Show,
    Create(GeofenceArgs),
    Update(GeofenceArgs),
    Remove,
}

#[derive(Args, Debug, Default)]
pub struct GeofenceArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,
    /// Radius in meters.
    #[arg(long)]
    pub radius: Option<i32>,
    #[arg(long)]
    pub active: Option<bool>,
}

impl GeofenceArgs {
    pub fn to_request(&self) -> GeofenceRequest {
        GeofenceRequest {
            name: non_blank(self.name.as_deref()),
            latitude: self.latitude,
            longitude: self.longitude,
            radius_m: self.radius,
            active: self.active,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum AlertCommand {
    List,
    /// Number of unread alerts.
    Count,
    Read { id: u64 },
    ReadAll,
}

fn text_patch(value: Option<&str>, clear: bool) -> Patch<String> {
    if clear {
        Patch::Clear
    } else {
        Patch::from_form(value.unwrap_or(""))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_date(input: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid date: {input}"))
}
