pub mod hit;
pub mod input;
pub mod interaction;
pub mod mutation;
pub mod properties;
pub mod session;
pub mod shortcuts;
pub mod view;

pub use input::{InputEvent, Modifiers, PointerTarget};
pub use interaction::{Gesture, InteractionController, ResizeHandle};
pub use mutation::SceneMutation;
pub use properties::PropertiesView;
pub use session::{EditorSession, Response};
pub use shortcuts::{ShortcutAction, ShortcutMap};
