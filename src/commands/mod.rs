mod general;
mod spreadsheet;

use crate::{Data, Error};

pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![general::ping(), spreadsheet::cambiar_email()]
}
