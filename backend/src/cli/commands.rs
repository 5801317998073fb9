//! Terminal client commands and arguments

use clap::{Args, Subcommand, ValueEnum};
use shared::{Field, FormValues};

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict the yield of a crop from agronomic inputs
    Predict(ObservationArgs),

    /// Submit an observed yield for future retraining
    Train(TrainArgs),

    /// Print the values the pickers accept
    Reference(ReferenceArgs),
}

/// The six form inputs. Anything left out keeps the form's default.
///
/// Values are taken as text and validated by the form, so `--year 2020.5`
/// is reported the same way the form would report it.
#[derive(Args, Debug, Default, Clone)]
pub struct ObservationArgs {
    /// Country, e.g. "India"
    #[arg(long)]
    pub area: Option<String>,

    /// Crop type, e.g. "Wheat"
    #[arg(long)]
    pub item: Option<String>,

    /// Average rainfall in mm per year
    #[arg(long, allow_hyphen_values = true)]
    pub rainfall: Option<String>,

    /// Pesticides used, in tonnes
    #[arg(long, allow_hyphen_values = true)]
    pub pesticides: Option<String>,

    /// Average temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    pub temp: Option<String>,

    /// Year of the observation (1900-2100)
    #[arg(long, allow_hyphen_values = true)]
    pub year: Option<String>,
}

impl ObservationArgs {
    /// Overwrite the given form values with whatever was passed
    pub fn apply_to(&self, values: &mut FormValues) {
        let given = [
            (Field::Area, &self.area),
            (Field::Item, &self.item),
            (Field::Rainfall, &self.rainfall),
            (Field::Pesticides, &self.pesticides),
            (Field::Temp, &self.temp),
            (Field::Year, &self.year),
        ];
        for (field, value) in given {
            if let Some(value) = value {
                values.set(field, value.clone());
            }
        }
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub observation: ObservationArgs,

    /// Observed yield in hectograms per hectare
    #[arg(long, allow_hyphen_values = true)]
    pub yield_value: Option<String>,
}

impl TrainArgs {
    pub fn apply_to(&self, values: &mut FormValues) {
        self.observation.apply_to(values);
        if let Some(value) = &self.yield_value {
            values.set(Field::YieldValue, value.clone());
        }
    }
}

#[derive(Args, Debug)]
pub struct ReferenceArgs {
    /// Which list to print
    #[arg(value_enum)]
    pub list: ReferenceList,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceList {
    Countries,
    Crops,
}
