mod applications;
mod common;
mod companies;
