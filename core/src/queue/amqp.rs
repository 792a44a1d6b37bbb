// core/src/queue/amqp.rs

use super::{ImagePublisher, JSON_CONTENT_TYPE};
use crate::error::CatalogResult;
use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};
use tracing::{debug, info, instrument};

/// `ImagePublisher` on an AMQP 0.9.1 broker (RabbitMQ).
///
/// All publishes go through a single channel. `lapin` serializes frames on a
/// channel internally, so the publisher can be shared across request tasks.
pub struct AmqpPublisher {
  connection: Connection,
  channel: Channel,
}

impl AmqpPublisher {
  /// Connects to `amqp_url` and opens the publishing channel.
  #[instrument(name = "AmqpPublisher::connect", skip_all, err(Display))]
  pub async fn connect(amqp_url: &str) -> CatalogResult<Self> {
    let connection = Connection::connect(amqp_url, ConnectionProperties::default()).await?;
    let channel = connection.create_channel().await?;
    info!(channel_id = channel.id(), "Connected to the message broker.");
    Ok(Self { connection, channel })
  }

  /// Closes the channel, then the connection.
  pub async fn close(&self) -> CatalogResult<()> {
    self.channel.close(200, "OK").await?;
    self.connection.close(200, "OK").await?;
    Ok(())
  }
}

#[async_trait]
impl ImagePublisher for AmqpPublisher {
  #[instrument(name = "AmqpPublisher::ensure_queue", skip(self))]
  async fn ensure_queue(&self, queue: &str) -> CatalogResult<()> {
    let options = QueueDeclareOptions {
      durable: true,
      exclusive: false,
      auto_delete: false,
      ..QueueDeclareOptions::default()
    };
    let declared = self.channel.queue_declare(queue, options, FieldTable::default()).await?;
    debug!(messages = declared.message_count(), "Queue declared.");
    Ok(())
  }

  #[instrument(name = "AmqpPublisher::publish", skip(self, payload), fields(payload_len = payload.len()))]
  async fn publish(&self, queue: &str, payload: &[u8]) -> CatalogResult<()> {
    let properties = BasicProperties::default().with_content_type(JSON_CONTENT_TYPE.into());
    // Publisher confirms are not enabled on this channel; dropping the confirm
    // handle does not wait for anything.
    let _confirm = self
      .channel
      .basic_publish("", queue, BasicPublishOptions::default(), payload, properties)
      .await?;
    debug!("Message handed to the broker.");
    Ok(())
  }
}
