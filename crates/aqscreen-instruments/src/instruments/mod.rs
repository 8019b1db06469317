pub mod aq10;
