mod helpers;
mod mocks;
mod orders;
