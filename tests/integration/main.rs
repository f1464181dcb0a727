//! End-to-end tests wiring the services over in-process collaborators.

mod helpers;
mod presence_test;
mod share_test;
