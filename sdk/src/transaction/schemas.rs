//! Body schemas for every entity type in the catalogue.

use super::schema::{array, scalar, sized, trailing, Attribute, Schema};
use super::types::EntityType;
use crate::config::{ADDRESS_SIZE, HASH_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};

const MOSAIC: &[Attribute] = &[scalar("id", 8), scalar("amount", 8)];

pub static TRANSFER: Schema = Schema::new(
    "transfer",
    &[
        scalar("recipient", ADDRESS_SIZE),
        scalar("message_size", 2),
        scalar("mosaics_count", 1),
        sized("message", "message_size"),
        array("mosaics", "mosaics_count", MOSAIC),
    ],
);

pub static MODIFY_MULTISIG: Schema = Schema::new(
    "modify_multisig",
    &[
        scalar("min_removal_delta", 1),
        scalar("min_approval_delta", 1),
        scalar("modifications_count", 1),
        array(
            "modifications",
            "modifications_count",
            &[scalar("type", 1), scalar("cosignatory", PUBLIC_KEY_SIZE)],
        ),
    ],
);

pub static REGISTER_NAMESPACE: Schema = Schema::new(
    "register_namespace",
    &[
        scalar("namespace_type", 1),
        scalar("duration_or_parent", 8),
        scalar("namespace_id", 8),
        scalar("name_size", 1),
        sized("name", "name_size"),
    ],
);

pub static MOSAIC_DEFINITION: Schema = Schema::new(
    "mosaic_definition",
    &[
        scalar("nonce", 4),
        scalar("mosaic_id", 8),
        scalar("properties_count", 1),
        scalar("flags", 1),
        scalar("divisibility", 1),
        array(
            "properties",
            "properties_count",
            &[scalar("id", 1), scalar("value", 8)],
        ),
    ],
);

pub static MOSAIC_SUPPLY_CHANGE: Schema = Schema::new(
    "mosaic_supply_change",
    &[
        scalar("mosaic_id", 8),
        scalar("direction", 1),
        scalar("delta", 8),
    ],
);

pub static ADDRESS_ALIAS: Schema = Schema::new(
    "address_alias",
    &[
        scalar("action", 1),
        scalar("namespace_id", 8),
        scalar("address", ADDRESS_SIZE),
    ],
);

pub static MOSAIC_ALIAS: Schema = Schema::new(
    "mosaic_alias",
    &[
        scalar("action", 1),
        scalar("namespace_id", 8),
        scalar("mosaic_id", 8),
    ],
);

pub static ACCOUNT_LINK: Schema = Schema::new(
    "account_link",
    &[scalar("remote_account_key", PUBLIC_KEY_SIZE), scalar("action", 1)],
);

pub static HASH_LOCK: Schema = Schema::new(
    "hash_lock",
    &[
        scalar("mosaic_id", 8),
        scalar("amount", 8),
        scalar("duration", 8),
        scalar("hash", HASH_SIZE),
    ],
);

pub static SECRET_LOCK: Schema = Schema::new(
    "secret_lock",
    &[
        scalar("mosaic_id", 8),
        scalar("amount", 8),
        scalar("duration", 8),
        scalar("hash_type", 1),
        scalar("secret", HASH_SIZE),
        scalar("recipient", ADDRESS_SIZE),
    ],
);

pub static SECRET_PROOF: Schema = Schema::new(
    "secret_proof",
    &[
        scalar("hash_type", 1),
        scalar("secret", HASH_SIZE),
        scalar("recipient", ADDRESS_SIZE),
        scalar("proof_size", 2),
        sized("proof", "proof_size"),
    ],
);

pub static ACCOUNT_PROPERTIES_ADDRESS: Schema = Schema::new(
    "account_properties_address",
    &[
        scalar("property_type", 1),
        scalar("modifications_count", 1),
        array(
            "modifications",
            "modifications_count",
            &[scalar("type", 1), scalar("value", ADDRESS_SIZE)],
        ),
    ],
);

pub static ACCOUNT_PROPERTIES_MOSAIC: Schema = Schema::new(
    "account_properties_mosaic",
    &[
        scalar("property_type", 1),
        scalar("modifications_count", 1),
        array(
            "modifications",
            "modifications_count",
            &[scalar("type", 1), scalar("value", 8)],
        ),
    ],
);

pub static ACCOUNT_PROPERTIES_ENTITY_TYPE: Schema = Schema::new(
    "account_properties_entity_type",
    &[
        scalar("property_type", 1),
        scalar("modifications_count", 1),
        array(
            "modifications",
            "modifications_count",
            &[scalar("type", 1), scalar("value", 2)],
        ),
    ],
);

const METADATA_MODIFICATION: &[Attribute] = &[
    scalar("size", 4),
    scalar("modification_type", 1),
    scalar("key_size", 1),
    scalar("value_size", 2),
    sized("key", "key_size"),
    sized("value", "value_size"),
];

pub static MODIFY_METADATA_ADDRESS: Schema = Schema::new(
    "modify_metadata_address",
    &[
        scalar("metadata_type", 1),
        scalar("metadata_id", ADDRESS_SIZE),
        trailing("modifications", METADATA_MODIFICATION),
    ],
);

pub static MODIFY_METADATA_ID: Schema = Schema::new(
    "modify_metadata_id",
    &[
        scalar("metadata_type", 1),
        scalar("metadata_id", 8),
        trailing("modifications", METADATA_MODIFICATION),
    ],
);

pub static ADD_EXCHANGE_OFFER: Schema = Schema::new(
    "add_exchange_offer",
    &[
        scalar("offers_count", 1),
        array(
            "offers",
            "offers_count",
            &[
                scalar("mosaic_id", 8),
                scalar("mosaic_amount", 8),
                scalar("cost", 8),
                scalar("type", 1),
                scalar("duration", 8),
            ],
        ),
    ],
);

pub static EXCHANGE_OFFER: Schema = Schema::new(
    "exchange_offer",
    &[
        scalar("offers_count", 1),
        array(
            "offers",
            "offers_count",
            &[
                scalar("mosaic_id", 8),
                scalar("mosaic_amount", 8),
                scalar("cost", 8),
                scalar("type", 1),
                scalar("owner", PUBLIC_KEY_SIZE),
            ],
        ),
    ],
);

pub static REMOVE_EXCHANGE_OFFER: Schema = Schema::new(
    "remove_exchange_offer",
    &[
        scalar("offers_count", 1),
        array(
            "offers",
            "offers_count",
            &[scalar("mosaic_id", 8), scalar("type", 1)],
        ),
    ],
);

/// Inner transactions are an opaque blob here; each one was already walked
/// against its own embedded schema when it was encoded.
pub static AGGREGATE: Schema = Schema::new(
    "aggregate",
    &[
        scalar("payload_size", 4),
        sized("transactions", "payload_size"),
        trailing(
            "cosignatures",
            &[scalar("signer", PUBLIC_KEY_SIZE), scalar("signature", SIGNATURE_SIZE)],
        ),
    ],
);

/// Schema of the body for `entity_type`.
pub fn schema_for(entity_type: EntityType) -> &'static Schema {
    match entity_type {
        EntityType::Transfer => &TRANSFER,
        EntityType::ModifyMultisig => &MODIFY_MULTISIG,
        EntityType::RegisterNamespace => &REGISTER_NAMESPACE,
        EntityType::MosaicDefinition => &MOSAIC_DEFINITION,
        EntityType::MosaicSupplyChange => &MOSAIC_SUPPLY_CHANGE,
        EntityType::AddressAlias => &ADDRESS_ALIAS,
        EntityType::MosaicAlias => &MOSAIC_ALIAS,
        EntityType::AccountLink => &ACCOUNT_LINK,
        EntityType::HashLock => &HASH_LOCK,
        EntityType::SecretLock => &SECRET_LOCK,
        EntityType::SecretProof => &SECRET_PROOF,
        EntityType::AccountPropertiesAddress => &ACCOUNT_PROPERTIES_ADDRESS,
        EntityType::AccountPropertiesMosaic => &ACCOUNT_PROPERTIES_MOSAIC,
        EntityType::AccountPropertiesEntityType => &ACCOUNT_PROPERTIES_ENTITY_TYPE,
        EntityType::ModifyMetadataAddress => &MODIFY_METADATA_ADDRESS,
        EntityType::ModifyMetadataMosaic | EntityType::ModifyMetadataNamespace => {
            &MODIFY_METADATA_ID
        }
        EntityType::AddExchangeOffer => &ADD_EXCHANGE_OFFER,
        EntityType::ExchangeOffer => &EXCHANGE_OFFER,
        EntityType::RemoveExchangeOffer => &REMOVE_EXCHANGE_OFFER,
        EntityType::AggregateComplete | EntityType::AggregateBonded => &AGGREGATE,
    }
}
