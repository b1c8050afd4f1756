pub mod assistant;
pub mod catalog;
pub mod coordinates;
pub mod distance;
pub mod itinerary;
pub mod partner;
pub mod place;
pub mod preferences;
pub mod pricing;
pub mod recommendation;
pub mod saved_tour;

pub use assistant::{Conversation, ConversationState, TourPlan};
pub use catalog::{RefillStation, Vehicle, VehicleType};
pub use coordinates::Coordinates;
pub use distance::DistanceKm;
pub use itinerary::{Itinerary, MealKind, MealSlot};
pub use partner::{NewPartnerApplication, PartnerApplication};
pub use place::{Place, PlaceCategory};
pub use preferences::{Budget, Pace, TransportMode, UserPreferences};
pub use pricing::{BillingCycle, PlanQuote, SubscriptionPlan};
pub use recommendation::{FoodCategory, FoodSpot, HotelOption, HotelTier, PriceRange};
pub use saved_tour::{NewSavedTour, SaveTourRequest, SavedTour};
