pub mod secure_generator;
