mod container;

pub use container::ContainerMiddleware;
