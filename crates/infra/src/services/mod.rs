mod email;

pub use email::{
    DeliveryFailure, IEmailGateway, InMemoryEmailGateway, ResendEmailGateway, SentEmail,
};
