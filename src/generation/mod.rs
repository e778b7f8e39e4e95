pub mod city;
pub mod collision;
pub mod lib;
pub mod sites;
pub mod terrain;
pub mod world;
