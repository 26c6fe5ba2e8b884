pub use self::world_display::WorldDisplay;

mod world_display;
