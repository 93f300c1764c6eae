/// Sites file: loading and persistence of host targets
pub mod sites;
